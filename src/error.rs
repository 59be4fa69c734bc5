// error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("history index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("history is empty")]
    Empty,
}

impl HistoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HistoryError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, HistoryError>;
