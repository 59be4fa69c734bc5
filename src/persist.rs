// persist.rs
//
// On-disk form: one UTF-8 line per entry, newline terminated, no header.
// Saving merges with whatever another process wrote since our last load,
// under an advisory lock on `<file>.lock`.

use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::mem;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{HistoryError, Result};
use crate::history::HistoryStore;
use crate::lock::LockGuard;

impl HistoryStore {
    /// Appends the lines of `path` through [`add`](Self::add) and returns
    /// how many of them were recorded.
    ///
    /// A file that cannot be opened counts as empty history.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no history to load");
                return Ok(0);
            }
        };
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        let mut loaded = 0usize;
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| HistoryError::io(path, e))?;
            if n == 0 {
                break;
            }
            if let Some(eol) = buf.iter().position(|&b| b == b'\r' || b == b'\n') {
                buf.truncate(eol);
            }
            if buf.is_empty() {
                continue;
            }
            if self.add(String::from_utf8_lossy(&buf).into_owned()) {
                loaded += 1;
            }
        }
        debug!(path = %path.display(), loaded, len = self.len(), "history loaded");
        Ok(loaded)
    }

    /// Merges with the file's current contents and rewrites it.
    ///
    /// The in-memory store ends up as "file contents, then this session's
    /// entries" even when the file cannot be written afterwards.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let _lock = match LockGuard::acquire(path) {
            Ok(guard) => Some(guard),
            Err(e) => {
                warn!(error = %e, "saving history without lock");
                None
            }
        };

        let session = mem::take(&mut self.entries);
        let merged = self.load(path);
        for entry in session {
            self.add(entry);
        }
        // a half-read file must not be overwritten
        merged?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .map_err(|e| {
                warn!(path = %path.display(), error = %e, "history file not writable, save abandoned");
                HistoryError::io(path, e)
            })?;
        fs::set_permissions(path, Permissions::from_mode(0o600))
            .map_err(|e| HistoryError::io(path, e))?;
        self.write_entries(file).map_err(|e| HistoryError::io(path, e))?;
        debug!(path = %path.display(), len = self.len(), "history saved");
        Ok(())
    }

    fn write_entries(&self, file: File) -> io::Result<()> {
        let mut out = BufWriter::new(file);
        for entry in self.iter().filter(|e| !e.is_empty()) {
            out.write_all(entry.as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }
}
