//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical record for one task list entry.
//! - Provide status helpers for the pending/done lifecycle.
//!
//! # Invariants
//! - `title` is trimmed and never empty.
//! - `created_at` is captured once at creation and never changes.
//! - `created_at` carries whole seconds only.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Render format for `created_at` (ISO-8601, second precision, no offset).
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Glyph rendered for pending items.
pub const PENDING_GLYPH: &str = "⬜";
/// Glyph rendered for completed items.
pub const DONE_GLYPH: &str = "✅";

/// Validation failures for user-provided item text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Title is empty or whitespace-only after trimming.
    EmptyTitle,
    /// Search keyword is empty or whitespace-only after trimming.
    EmptyKeyword,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Task title cannot be empty."),
            Self::EmptyKeyword => write!(f, "Search keyword cannot be empty."),
        }
    }
}

impl Error for ItemValidationError {}

/// Two-state lifecycle of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    Done,
}

impl ItemStatus {
    /// Fixed display symbol for this status.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Pending => PENDING_GLYPH,
            Self::Done => DONE_GLYPH,
        }
    }
}

/// One entry of the task list.
///
/// Fields are read-only outside this module so the title invariant cannot be
/// bypassed after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct Item {
    title: String,
    done: bool,
    created_at: NaiveDateTime,
}

/// Unvalidated wire shape used for deserialization.
#[derive(Deserialize)]
struct ItemRecord {
    title: String,
    #[serde(default)]
    done: bool,
    created_at: NaiveDateTime,
}

impl TryFrom<ItemRecord> for Item {
    type Error = ItemValidationError;

    fn try_from(value: ItemRecord) -> Result<Self, Self::Error> {
        let mut item = Item::new(&value.title, value.created_at)?;
        item.done = value.done;
        Ok(item)
    }
}

impl Item {
    /// Creates a pending item from raw title text.
    ///
    /// # Invariants
    /// - Title is trimmed before storage.
    /// - Sub-second precision of `created_at` is dropped.
    ///
    /// # Errors
    /// - Returns [`ItemValidationError::EmptyTitle`] when the trimmed title is empty.
    pub fn new(title: &str, created_at: NaiveDateTime) -> Result<Self, ItemValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ItemValidationError::EmptyTitle);
        }

        Ok(Self {
            title: trimmed.to_string(),
            done: false,
            created_at: truncate_to_seconds(created_at),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn status(&self) -> ItemStatus {
        if self.done {
            ItemStatus::Done
        } else {
            ItemStatus::Pending
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// Sets the completion flag. Setting the current value again is a no-op.
    pub fn set_done(&mut self, done: bool) {
        if done {
            self.mark_done();
        } else {
            self.mark_undone();
        }
    }

    /// Case-insensitive substring check against an already-lowercased keyword.
    pub(crate) fn matches_lowercase(&self, keyword: &str) -> bool {
        self.title.to_lowercase().contains(keyword)
    }
}

fn truncate_to_seconds(value: NaiveDateTime) -> NaiveDateTime {
    value.with_nanosecond(0).unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemStatus, ItemValidationError, CREATED_AT_FORMAT};
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|d| d.and_hms_milli_opt(h, m, s, 750))
            .expect("valid test timestamp")
    }

    #[test]
    fn new_trims_title_and_drops_subseconds() {
        let item = Item::new("  Buy milk \t", at(9, 30, 5)).expect("valid title");
        assert_eq!(item.title(), "Buy milk");
        assert_eq!(
            item.created_at().format(CREATED_AT_FORMAT).to_string(),
            "2026-10-19T09:30:05"
        );
        assert_eq!(item.status(), ItemStatus::Pending);
    }

    #[test]
    fn new_rejects_blank_title() {
        assert_eq!(
            Item::new(" \n ", at(0, 0, 0)).unwrap_err(),
            ItemValidationError::EmptyTitle
        );
    }

    #[test]
    fn set_done_is_idempotent() {
        let mut item = Item::new("x", at(1, 2, 3)).unwrap();
        item.set_done(true);
        item.set_done(true);
        assert!(item.is_done());
        assert_eq!(item.status().glyph(), "✅");
        item.set_done(false);
        assert_eq!(item.status().glyph(), "⬜");
    }
}
