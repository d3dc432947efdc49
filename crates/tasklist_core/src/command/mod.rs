//! Command protocol: line parsing and the interactive loop.
//!
//! # Responsibility
//! - Translate raw input lines into typed commands.
//! - Drive the item store and render results to an output sink.

pub mod parse;
pub mod session;
