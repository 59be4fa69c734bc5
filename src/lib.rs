//! Interactive line history for line editors.
//!
//! [`HistoryStore`] keeps previously entered lines in chronological order,
//! bounds and deduplicates them, and supports arrow-key style recall and
//! wrap-around prefix search. [`HistoryStore::save`] merges with the file
//! on disk under an advisory lock so several processes can share one
//! history file.

pub mod config;
pub mod entry;
pub mod error;
pub mod history;
pub mod lock;
pub mod logging;
mod persist;

pub use config::{HistoryConfig, DEFAULT_CAPACITY};
pub use entry::Entry;
pub use error::{HistoryError, Result};
pub use history::{HistoryStore, Position};
pub use lock::LockGuard;
