//! Advisory locking of the log via fd-lock on a sidecar file.
//!
//! The log itself is replaced by rename on every write, so the lock lives on
//! `<log>.lock`, which is never renamed. Shared locks allow concurrent
//! readers; the exclusive lock covers a whole read-modify-write.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fd_lock::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};

/// Cross-process lock guarding one log file.
pub struct LogLock {
    lock_file: RwLock<File>,
    lock_path: PathBuf,
}

impl LogLock {
    /// Open (creating if needed) the lock file next to `log_path`.
    pub fn open(log_path: &Path) -> Result<Self> {
        let lock_path = lock_path_for(log_path);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| Error::io(&lock_path, e))?;
        Ok(Self {
            lock_file: RwLock::new(file),
            lock_path,
        })
    }

    /// Open the lock file next to `log_path` read-only, without creating it.
    ///
    /// Returns `None` when no writer has created the lock file yet.
    pub fn open_existing(log_path: &Path) -> Result<Option<Self>> {
        let lock_path = lock_path_for(log_path);
        match File::open(&lock_path) {
            Ok(file) => Ok(Some(Self {
                lock_file: RwLock::new(file),
                lock_path,
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(&lock_path, e)),
        }
    }

    /// Acquire a shared lock, blocking while a writer holds it.
    pub fn read(&mut self) -> Result<RwLockReadGuard<'_, File>> {
        let lock_path = &self.lock_path;
        self.lock_file.read().map_err(|e| Error::io(lock_path, e))
    }

    /// Acquire the exclusive lock, blocking while anyone else holds it.
    pub fn write(&mut self) -> Result<RwLockWriteGuard<'_, File>> {
        let lock_path = &self.lock_path;
        self.lock_file.write().map_err(|e| Error::io(lock_path, e))
    }

    /// Get the lock file path.
    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

/// `log.json` -> `log.json.lock`
pub fn lock_path_for(log_path: &Path) -> PathBuf {
    let mut name = OsString::from(log_path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}
