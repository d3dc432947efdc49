//! Line parsing for the interactive command protocol.
//!
//! # Responsibility
//! - Split one input line into a command keyword and a verbatim argument.
//! - Convert position arguments with a strict integer parser.
//!
//! # Invariants
//! - Blank lines never produce a command or an error.
//! - The argument is never tokenized further; internal spaces are preserved.

use crate::model::item::ItemValidationError;
use crate::store::item_store::StoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static COMMAND_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S+)(?:\s+(.*))?$").expect("valid command line regex"));

/// User-facing notice for bad or out-of-range positions.
pub const INVALID_INDEX_MESSAGE: &str = "Invalid index.";
/// User-facing notice for unrecognized keywords.
pub const UNKNOWN_COMMAND_MESSAGE: &str = "Unknown command. Type 'help'.";

/// One parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    List,
    Done(usize),
    Undone(usize),
    Remove(usize),
    ClearDone,
    Search(String),
    Help,
    Quit,
}

/// Recoverable command failure. The loop reports it and keeps reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Position argument is not an integer.
    InvalidPosition { command: String, argument: String },
    /// Keyword is not part of the protocol.
    UnknownCommand(String),
    /// Item store rejected the operation.
    Store(StoreError),
}

impl CommandError {
    /// Message printed to the user for this error.
    ///
    /// Non-integer and out-of-range positions share one notice. A rejected
    /// title carries the `Error explained:` prefix; a rejected search keyword
    /// is printed bare.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidPosition { .. } | Self::Store(StoreError::OutOfRange { .. }) => {
                INVALID_INDEX_MESSAGE.to_string()
            }
            Self::UnknownCommand(_) => UNKNOWN_COMMAND_MESSAGE.to_string(),
            Self::Store(StoreError::InvalidInput(err @ ItemValidationError::EmptyTitle)) => {
                format!("Error explained: {err}")
            }
            Self::Store(StoreError::InvalidInput(err @ ItemValidationError::EmptyKeyword)) => {
                err.to_string()
            }
        }
    }

    /// Stable short code for diagnostics logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPosition { .. } => "parse_error",
            Self::UnknownCommand(_) => "unknown_command",
            Self::Store(StoreError::OutOfRange { .. }) => "out_of_range",
            Self::Store(StoreError::InvalidInput(_)) => "invalid_input",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPosition { command, argument } => {
                write!(f, "`{command}` expects an integer position, got `{argument}`")
            }
            Self::UnknownCommand(keyword) => write!(f, "unknown command `{keyword}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Parses one raw input line.
///
/// Returns `None` for blank lines. The keyword is matched case-insensitively;
/// arguments passed to argument-less commands are ignored.
pub fn parse_line(line: &str) -> Option<Result<Command, CommandError>> {
    let captures = COMMAND_LINE_RE.captures(line.trim())?;
    let keyword = captures.get(1)?.as_str().to_lowercase();
    let argument = captures.get(2).map_or("", |m| m.as_str());

    let command = match keyword.as_str() {
        "add" => Ok(Command::Add(argument.to_string())),
        "list" => Ok(Command::List),
        "done" => parse_position(&keyword, argument).map(Command::Done),
        "undone" => parse_position(&keyword, argument).map(Command::Undone),
        "rm" => parse_position(&keyword, argument).map(Command::Remove),
        "clear-done" => Ok(Command::ClearDone),
        "search" => Ok(Command::Search(argument.to_string())),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::UnknownCommand(keyword.clone())),
    };
    Some(command)
}

fn parse_position(command: &str, argument: &str) -> Result<usize, CommandError> {
    argument
        .parse::<usize>()
        .map_err(|_| CommandError::InvalidPosition {
            command: command.to_string(),
            argument: argument.to_string(),
        })
}
