//! Interactive command loop over an item store.
//!
//! # Responsibility
//! - Read lines, dispatch parsed commands to the store and render results.
//! - Write every message through the injected output sink.
//!
//! # Invariants
//! - Each command is fully rendered and flushed before the next read.
//! - Command errors are reported and never end the loop.
//! - Only I/O failures of the input stream or sink propagate to the caller.
//! - Undecodable input bytes never end the loop.

use crate::clock::Clock;
use crate::command::parse::{parse_line, Command, CommandError};
use crate::store::item_store::{ItemStore, ListedItem, Listing, SearchOutcome};
use log::{info, warn};
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "> ";
pub const BANNER: &str = "Simple Todo App (type 'help' for commands)";
pub const FAREWELL: &str = "Bye!";

pub const HELP_TEXT: &str = "
Commands:
  add <title>       Add a task
  list              List tasks
  done <index>      Mark task done
  undone <index>    Mark task not done
  rm <index>        Remove a task
  clear-done        Remove all completed tasks
  help              Show help
  quit              Exit the app
  search <keyword>  Search tasks by keyword
";

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Why [`CommandLoop::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// User typed `quit` or `exit`.
    Quit,
    /// Input stream closed.
    EndOfInput,
}

/// Command loop owning the store and the output sink.
pub struct CommandLoop<C: Clock, W: Write> {
    store: ItemStore<C>,
    out: W,
}

impl<C: Clock, W: Write> CommandLoop<C, W> {
    pub fn new(store: ItemStore<C>, out: W) -> Self {
        Self { store, out }
    }

    pub fn store(&self) -> &ItemStore<C> {
        &self.store
    }

    /// Consumes the loop and returns the sink, e.g. to inspect captured output.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Prints the startup banner followed by the help text.
    pub fn print_banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "{BANNER}")?;
        self.print_help()
    }

    /// Reads and executes lines until `quit`/`exit` or end of input.
    ///
    /// Both exits print the farewell message before returning. Lines that are
    /// not valid UTF-8 are decoded lossily; only sink failures and input
    /// read failures end the loop with an error.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<LoopExit> {
        let mut buf = Vec::new();
        loop {
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                writeln!(self.out, "\n{FAREWELL}")?;
                self.out.flush()?;
                info!("event=loop_exit module=command status=ok reason=end_of_input");
                return Ok(LoopExit::EndOfInput);
            }

            let line = String::from_utf8_lossy(&buf);
            let Some(parsed) = parse_line(&line) else {
                continue;
            };
            let flow = match parsed {
                Ok(command) => self.execute(command)?,
                Err(err) => {
                    self.report(&err)?;
                    Flow::Continue
                }
            };
            self.out.flush()?;

            if flow == Flow::Exit {
                info!("event=loop_exit module=command status=ok reason=quit");
                return Ok(LoopExit::Quit);
            }
        }
    }

    /// Executes one command, reporting recoverable errors to the sink.
    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match self.dispatch(command) {
            Ok(flow) => Ok(flow),
            Err(DispatchError::Command(err)) => {
                self.report(&err)?;
                Ok(Flow::Continue)
            }
            Err(DispatchError::Io(err)) => Err(err),
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow, DispatchError> {
        match command {
            Command::Add(title) => {
                self.store.add(&title).map_err(CommandError::from)?;
                writeln!(self.out, "Added.")?;
            }
            Command::List => self.render_listing()?,
            Command::Done(position) => {
                self.store
                    .set_done(position, true)
                    .map_err(CommandError::from)?;
                writeln!(self.out, "Marked done.")?;
            }
            Command::Undone(position) => {
                self.store
                    .set_done(position, false)
                    .map_err(CommandError::from)?;
                writeln!(self.out, "Marked undone.")?;
            }
            Command::Remove(position) => {
                self.store.remove(position).map_err(CommandError::from)?;
                writeln!(self.out, "Removed.")?;
            }
            Command::ClearDone => {
                let removed = self.store.clear_done();
                writeln!(self.out, "Removed {removed} completed task(s).")?;
            }
            Command::Search(keyword) => self.render_search(&keyword)?,
            Command::Help => self.print_help()?,
            Command::Quit => {
                writeln!(self.out, "{FAREWELL}")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn render_listing(&mut self) -> io::Result<()> {
        match self.store.list() {
            Listing::NoItems => writeln!(self.out, "No tasks yet."),
            Listing::Items(rows) => {
                for row in &rows {
                    writeln!(
                        self.out,
                        "{}  (created {})",
                        row_prefix(row),
                        row.created_at_display()
                    )?;
                }
                Ok(())
            }
        }
    }

    fn render_search(&mut self, keyword: &str) -> Result<(), DispatchError> {
        match self.store.search(keyword).map_err(CommandError::from)? {
            SearchOutcome::NoMatches => writeln!(self.out, "No matching tasks.")?,
            SearchOutcome::Matches(rows) => {
                for row in &rows {
                    writeln!(self.out, "{}", row_prefix(row))?;
                }
            }
        }
        Ok(())
    }

    fn print_help(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP_TEXT}")
    }

    fn report(&mut self, err: &CommandError) -> io::Result<()> {
        warn!(
            "event=command_rejected module=command status=error error_code={}",
            err.code()
        );
        writeln!(self.out, "{}", err.user_message())
    }
}

fn row_prefix(row: &ListedItem<'_>) -> String {
    format!("{:>2}. {} {}", row.position, row.glyph(), row.title)
}

/// Internal split between reportable command errors and sink failures.
enum DispatchError {
    Command(CommandError),
    Io(io::Error),
}

impl From<CommandError> for DispatchError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

impl From<io::Error> for DispatchError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
