//! Item store layer.
//!
//! # Responsibility
//! - Hold the ordered item collection and its mutation operations.
//! - Return semantic errors (`InvalidInput`, `OutOfRange`) instead of panicking.

pub mod item_store;
