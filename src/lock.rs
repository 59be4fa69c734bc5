// lock.rs

use nix::fcntl::{flock, FlockArg};
use std::fs::{self, File, OpenOptions};
use std::os::unix::fs::{MetadataExt, OpenOptionsExt};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{HistoryError, Result};

/// Exclusive advisory lock on `<history>.lock`, held until dropped.
///
/// Dropping the guard removes the lock file and unlocks, so every exit
/// path out of a save releases it.
#[derive(Debug)]
pub struct LockGuard {
    file: File,
    path: PathBuf,
}

impl LockGuard {
    /// Blocks until the lock beside `history` is ours.
    pub fn acquire(history: &Path) -> Result<Self> {
        let path = lock_path(history);
        loop {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .mode(0o600)
                .open(&path)
                .map_err(|e| HistoryError::io(&path, e))?;
            flock(file.as_raw_fd(), FlockArg::LockExclusive)
                .map_err(|errno| HistoryError::io(&path, errno.into()))?;
            // the previous holder unlinks on release, so our inode may be stale
            let held = file.metadata().map_err(|e| HistoryError::io(&path, e))?;
            match fs::metadata(&path) {
                Ok(current) if current.dev() == held.dev() && current.ino() == held.ino() => {
                    debug!(lock = %path.display(), "history lock acquired");
                    return Ok(Self { file, path });
                }
                _ => debug!(lock = %path.display(), "lock file replaced, retrying"),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // unlink while still holding the lock so waiters notice the stale inode
        if let Err(e) = fs::remove_file(&self.path) {
            debug!(lock = %self.path.display(), error = %e, "lock file already gone");
        }
        if let Err(errno) = flock(self.file.as_raw_fd(), FlockArg::Unlock) {
            warn!(lock = %self.path.display(), %errno, "failed to release history lock");
        }
    }
}

pub fn lock_path(history: &Path) -> PathBuf {
    let mut name = history.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}
