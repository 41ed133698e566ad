//! # Store File Lock
//!
//! Uses `fs2` for cross-platform advisory locking (flock on Unix, LockFile on
//! Windows) so that two processes never rewrite the same store file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Errors from store locking
#[derive(Debug)]
pub enum LockError {
    /// Lock file could not be created
    CreateFailed(io::Error),
    /// Store is already locked by another process
    AlreadyLocked { pid: Option<u32>, path: PathBuf },
}

impl std::fmt::Display for LockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockError::CreateFailed(e) => write!(f, "Failed to create lock file: {}", e),
            LockError::AlreadyLocked { pid, path } => match pid {
                Some(p) => write!(f, "Store already in use by process {} ({})", p, path.display()),
                None => write!(f, "Store already in use ({})", path.display()),
            },
        }
    }
}

impl std::error::Error for LockError {}

/// Exclusive lock on `<store path>.lock`, released on drop (RAII).
#[derive(Debug)]
pub struct FileLock {
    /// The lock file handle (kept open to maintain lock)
    file: File,
    /// Path to the lock file
    path: PathBuf,
}

impl FileLock {
    /// Acquire the lock guarding `store_path`. Does not wait.
    pub fn acquire(store_path: &Path) -> Result<Self, LockError> {
        let mut lock_path = store_path.as_os_str().to_owned();
        lock_path.push(".lock");
        let lock_path = PathBuf::from(lock_path);

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(LockError::CreateFailed)?;

        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked {
                pid: Self::read_existing_pid(&lock_path),
                path: lock_path,
            });
        }

        // Best effort: the PID only improves the error message of a competitor.
        let _ = file.set_len(0);
        let _ = writeln!(file, "{}", std::process::id());

        Ok(Self {
            file,
            path: lock_path,
        })
    }

    /// Get the path to the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}
