// history.rs

use std::slice;
use tracing::trace;

use crate::config::HistoryConfig;
use crate::entry::Entry;
use crate::error::{HistoryError, Result};

/// Target for [`HistoryStore::reset_pos`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// The newest entry; also ends the current recall.
    Last,
    At(usize),
}

/// Bounded, optionally deduplicating list of previously entered lines with
/// a browse cursor.
///
/// Index 0 is the oldest retained entry. The store is not thread safe; the
/// owning editor drives it from a single thread.
#[derive(Clone, Debug)]
pub struct HistoryStore {
    pub(crate) entries: Vec<Entry>,
    capacity: usize,
    unique: bool,
    cursor: usize,
    saved_cursor: Option<usize>,
    recalling: bool,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::with_config(&HistoryConfig::default())
    }
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            unique: true,
            cursor: 0,
            saved_cursor: None,
            recalling: false,
        }
    }

    pub fn with_config(config: &HistoryConfig) -> Self {
        let mut store = Self::new(config.capacity);
        store.unique = config.unique;
        store
    }

    /// Records `line` as the newest entry.
    ///
    /// Returns false when nothing was recorded: recording is disabled
    /// (capacity 0) or `line` repeats the newest entry.
    ///
    /// Eviction looks at the size before the append, so a full store holds
    /// `capacity + 1` entries after this returns.
    pub fn add(&mut self, line: impl Into<Entry>) -> bool {
        let line = line.into();
        if self.capacity == 0 || self.entries.last() == Some(&line) {
            return false;
        }
        if self.unique {
            self.entries.retain(|e| *e != line);
        }
        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.saved_cursor = self.saved_cursor.and_then(|i| i.checked_sub(1));
            trace!(len = self.entries.len(), "evicted oldest history entry");
        }
        self.entries.push(line);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.saved_cursor = None;
    }

    /// Changes the bound and drops the oldest overflow right away.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if capacity < self.entries.len() {
            let excess = self.entries.len() - capacity;
            self.entries.drain(..excess);
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Only affects later adds.
    pub fn set_unique(&mut self, unique: bool) {
        self.unique = unique;
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Result<&Entry> {
        self.entries.get(index).ok_or(HistoryError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Result<&Entry> {
        if self.entries.is_empty() {
            return Err(HistoryError::Empty);
        }
        self.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn saved_cursor(&self) -> Option<usize> {
        self.saved_cursor
    }

    /// Remembers where browsing started, so that the next downward move
    /// lands there directly.
    pub fn set_saved_cursor(&mut self, saved: Option<usize>) {
        self.saved_cursor = saved;
    }

    pub fn is_recalling(&self) -> bool {
        self.recalling
    }

    pub fn is_last(&self) -> bool {
        self.cursor.checked_add(1) == Some(self.entries.len())
    }

    fn last_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// Positions the cursor without bounds checks.
    pub fn reset_pos(&mut self, pos: Position) {
        match pos {
            Position::Last => {
                self.cursor = self.last_index();
                self.recalling = false;
            }
            Position::At(i) => self.cursor = i,
        }
    }

    /// One arrow-key step. Returns false when the cursor hit either end.
    pub fn move_cursor(&mut self, up: bool) -> bool {
        let target = match (self.saved_cursor, up) {
            (Some(saved), false) => Some(saved),
            (_, true) => self.cursor.checked_sub(1),
            (_, false) => self.cursor.checked_add(1),
        };
        self.saved_cursor = None;
        match target {
            None if up => {
                self.cursor = 0;
                false
            }
            None => {
                self.cursor = self.last_index();
                false
            }
            Some(i) if i >= self.entries.len() => {
                self.cursor = self.last_index();
                false
            }
            Some(i) => {
                self.cursor = i;
                self.recalling = true;
                true
            }
        }
    }

    pub fn jump(&mut self, to_start: bool) {
        self.cursor = if to_start { 0 } else { self.last_index() };
        self.saved_cursor = None;
        self.recalling = true;
    }

    /// Circular scan, starting next to the cursor, for an entry whose
    /// first `prefix_len` characters match those of `prefix`.
    ///
    /// The entry under the cursor is only reached last if at all; a full
    /// lap without a match leaves the store untouched.
    pub fn common_prefix_search(&mut self, prefix: &str, prefix_len: usize, backward: bool) -> bool {
        let len = self.entries.len();
        if len == 0 {
            return false;
        }
        let origin = self.cursor.min(len - 1);
        let step = if backward { len - 1 } else { 1 };
        let mut i = (origin + step) % len;
        while i != origin {
            if self.entries[i].starts_with_chars(prefix, prefix_len) {
                self.cursor = i;
                self.saved_cursor = None;
                self.recalling = true;
                return true;
            }
            i = (i + step) % len;
        }
        false
    }
}

impl<'a> IntoIterator for &'a HistoryStore {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
