//! Domain model for task list entries.
//!
//! # Responsibility
//! - Define canonical data structures used by the item store.
//!
//! # Invariants
//! - Items are only constructed through validating constructors.

pub mod item;
