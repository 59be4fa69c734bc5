// config.rs

use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Capacity used when neither the caller nor `HISTSIZE` picks one.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Settings a [`HistoryStore`](crate::HistoryStore) is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryConfig {
    pub capacity: usize,
    pub unique: bool,
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            unique: true,
            path: None,
        }
    }
}

impl HistoryConfig {
    /// Defaults overridden by `HISTFILE`, `HISTSIZE` and `HISTCONTROL`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(file) = lookup("HISTFILE").filter(|f| !f.trim().is_empty()) {
            config.path = Some(PathBuf::from(file));
        }
        if let Some(size) = lookup("HISTSIZE") {
            match size.trim().parse::<i64>() {
                Ok(n) if n >= 0 => config.capacity = usize::try_from(n).unwrap_or(usize::MAX),
                Ok(n) => warn!(value = n, "ignoring negative HISTSIZE"),
                Err(_) => warn!(value = %size, "ignoring unparsable HISTSIZE"),
            }
        }
        if let Some(control) = lookup("HISTCONTROL") {
            let flags: Vec<&str> = control.split(':').map(str::trim).collect();
            if flags.contains(&"erasedups") {
                config.unique = true;
            } else if flags.contains(&"ignoredups") {
                config.unique = false;
            }
        }
        config
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}
