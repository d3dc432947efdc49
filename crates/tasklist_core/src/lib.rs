//! Core logic for the interactive task list.
//! This crate owns the item invariants and the command protocol; binaries
//! only wire it to real stdin/stdout.

pub mod clock;
pub mod command;
pub mod logging;
pub mod model;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use command::parse::{parse_line, Command, CommandError};
pub use command::session::{CommandLoop, Flow, LoopExit, FAREWELL};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::item::{Item, ItemStatus, ItemValidationError};
pub use store::item_store::{
    ItemStore, ListedItem, Listing, SearchOutcome, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
