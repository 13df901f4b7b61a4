use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

/// Name of the lock file next to plants.json
pub const LOCK_FILE: &str = ".plants.lock";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const FIRST_BACKOFF: Duration = Duration::from_millis(5);
const MAX_BACKOFF: Duration = Duration::from_millis(80);

/// Exclusive hold on a catalog's plant collection.
///
/// Every store mutation reads, modifies and rewrites plants.json under this
/// lock so a TUI and any number of CLI invocations see whole collections.
/// Dropping the guard closes the file, which releases the flock.
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not open lock file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("plants are locked by another frond process ({path}); gave up after {waited:?}")]
    Busy { path: PathBuf, waited: Duration },
}

impl StoreLock {
    /// Wait up to five seconds for the collection in `catalog_dir`.
    pub fn acquire(catalog_dir: &Path) -> Result<Self, LockError> {
        Self::acquire_within(catalog_dir, DEFAULT_TIMEOUT)
    }

    /// Wait up to `timeout`, backing off between attempts.
    pub fn acquire_within(catalog_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = catalog_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::Open {
                path: path.clone(),
                source,
            })?;

        let start = Instant::now();
        let mut backoff = FIRST_BACKOFF;
        while !try_flock(&file) {
            let waited = start.elapsed();
            if waited >= timeout {
                return Err(LockError::Busy { path, waited });
            }
            debug!(waited_ms = waited.as_millis() as u64, "plant store is locked, waiting");
            std::thread::sleep(backoff);
            backoff = (backoff * 2).min(MAX_BACKOFF);
        }
        Ok(StoreLock { _file: file })
    }
}

/// Non-blocking exclusive flock
#[cfg(unix)]
fn try_flock(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;
    unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) == 0 }
}

#[cfg(not(unix))]
fn try_flock(_file: &File) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn released_on_drop() {
        let tmp = TempDir::new().unwrap();
        let first = StoreLock::acquire(tmp.path()).unwrap();
        drop(first);
        assert!(StoreLock::acquire(tmp.path()).is_ok());
        assert!(tmp.path().join(LOCK_FILE).exists());
    }

    #[cfg(unix)]
    #[test]
    fn second_holder_gives_up() {
        let tmp = TempDir::new().unwrap();
        let _held = StoreLock::acquire(tmp.path()).unwrap();
        let err = StoreLock::acquire_within(tmp.path(), Duration::from_millis(30)).unwrap_err();
        assert!(matches!(err, LockError::Busy { .. }));
        assert!(err.to_string().contains("locked by another frond process"));
    }

    #[test]
    fn missing_directory_is_an_open_error() {
        let tmp = TempDir::new().unwrap();
        let err = StoreLock::acquire(&tmp.path().join("gone")).unwrap_err();
        assert!(matches!(err, LockError::Open { .. }));
    }
}
