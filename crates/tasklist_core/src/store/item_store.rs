//! In-memory ordered item store.
//!
//! # Responsibility
//! - Own every `Item` and apply all list mutations.
//! - Produce numbered views for listing and searching.
//!
//! # Invariants
//! - Order is insertion order; it defines user-facing positions.
//! - Positions are 1-based and recomputed on every view, never stored.
//! - Every mutation either fully applies or leaves the store unchanged.
//! - Titles and keywords are never logged, only counts and positions.

use crate::clock::{Clock, SystemClock};
use crate::model::item::{Item, ItemStatus, ItemValidationError, CREATED_AT_FORMAT};
use chrono::NaiveDateTime;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for item mutations and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Title or keyword failed validation.
    InvalidInput(ItemValidationError),
    /// Position is outside `1..=len`.
    OutOfRange { position: usize, len: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::OutOfRange { position, len } => {
                write!(f, "task index {position} out of range 1..={len}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<ItemValidationError> for StoreError {
    fn from(value: ItemValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

/// One numbered row of a listing or search view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListedItem<'a> {
    /// 1-based position within the view that produced this row.
    pub position: usize,
    pub status: ItemStatus,
    pub title: &'a str,
    pub created_at: NaiveDateTime,
}

impl<'a> ListedItem<'a> {
    fn from_item(position: usize, item: &'a Item) -> Self {
        Self {
            position,
            status: item.status(),
            title: item.title(),
            created_at: item.created_at(),
        }
    }

    pub fn glyph(&self) -> &'static str {
        self.status.glyph()
    }

    /// Returns `created_at` in [`CREATED_AT_FORMAT`].
    pub fn created_at_display(&self) -> String {
        self.created_at.format(CREATED_AT_FORMAT).to_string()
    }
}

/// Result of [`ItemStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<'a> {
    /// The store holds no items.
    NoItems,
    /// Every item in store order, numbered `1..=len`.
    Items(Vec<ListedItem<'a>>),
}

/// Result of [`ItemStore::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// No title contains the keyword.
    NoMatches,
    /// Matching items in store order, numbered by match order (not store order).
    Matches(Vec<ListedItem<'a>>),
}

/// Ordered in-memory collection of items.
pub struct ItemStore<C: Clock = SystemClock> {
    items: Vec<Item>,
    clock: C,
}

impl ItemStore<SystemClock> {
    /// Creates an empty store stamped by local system time.
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock)
    }
}

impl Default for ItemStore<SystemClock> {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

impl<C: Clock> ItemStore<C> {
    /// Creates an empty store using the provided clock.
    pub fn new(clock: C) -> Self {
        Self {
            items: Vec::new(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only view of all items in store order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the item at a 1-based position, if any.
    pub fn get(&self, position: usize) -> Option<&Item> {
        position
            .checked_sub(1)
            .and_then(|index| self.items.get(index))
    }

    /// Appends a new pending item stamped with the clock's current time.
    ///
    /// # Errors
    /// - `InvalidInput(EmptyTitle)` when the trimmed title is empty; the store
    ///   is left unchanged.
    pub fn add(&mut self, title: &str) -> StoreResult<()> {
        let item = Item::new(title, self.clock.now())?;
        let title_len = item.title().chars().count();
        self.items.push(item);
        info!(
            "event=item_add module=store status=ok position={} title_len={}",
            self.items.len(),
            title_len
        );
        Ok(())
    }

    /// Numbers every item in store order, or signals an empty store.
    pub fn list(&self) -> Listing<'_> {
        if self.items.is_empty() {
            return Listing::NoItems;
        }

        Listing::Items(
            self.items
                .iter()
                .enumerate()
                .map(|(index, item)| ListedItem::from_item(index + 1, item))
                .collect(),
        )
    }

    /// Sets the completion flag of the item at `position`.
    ///
    /// Idempotent for repeated calls with the same `done`.
    pub fn set_done(&mut self, position: usize, done: bool) -> StoreResult<()> {
        let index = self.index_of(position)?;
        self.items[index].set_done(done);
        info!(
            "event=item_set_done module=store status=ok position={} done={}",
            position, done
        );
        Ok(())
    }

    /// Removes and returns the item at `position`; later items shift down by one.
    pub fn remove(&mut self, position: usize) -> StoreResult<Item> {
        let index = self.index_of(position)?;
        let removed = self.items.remove(index);
        info!(
            "event=item_remove module=store status=ok position={} remaining={}",
            position,
            self.items.len()
        );
        Ok(removed)
    }

    /// Removes every done item, keeping the relative order of the rest.
    ///
    /// Returns how many items were removed.
    pub fn clear_done(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_done());
        let removed = before - self.items.len();
        info!(
            "event=item_clear_done module=store status=ok removed={} remaining={}",
            removed,
            self.items.len()
        );
        removed
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Matches are numbered by their order among the matches, so a match's
    /// position generally differs from its position in [`ItemStore::list`].
    ///
    /// # Errors
    /// - `InvalidInput(EmptyKeyword)` when the trimmed keyword is empty.
    pub fn search(&self, keyword: &str) -> StoreResult<SearchOutcome<'_>> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(ItemValidationError::EmptyKeyword.into());
        }

        let matches: Vec<ListedItem<'_>> = self
            .items
            .iter()
            .filter(|item| item.matches_lowercase(&keyword))
            .enumerate()
            .map(|(index, item)| ListedItem::from_item(index + 1, item))
            .collect();
        debug!(
            "event=item_search module=store status=ok keyword_len={} matches={}",
            keyword.chars().count(),
            matches.len()
        );

        if matches.is_empty() {
            Ok(SearchOutcome::NoMatches)
        } else {
            Ok(SearchOutcome::Matches(matches))
        }
    }

    fn index_of(&self, position: usize) -> StoreResult<usize> {
        if position == 0 || position > self.items.len() {
            debug!(
                "event=position_check module=store status=error position={} len={}",
                position,
                self.items.len()
            );
            return Err(StoreError::OutOfRange {
                position,
                len: self.items.len(),
            });
        }
        Ok(position - 1)
    }
}
