//! Durable, append-only log of samples.
//!
//! The log is a single JSON document holding an ordered array of
//! [`LogRecord`]s. Every append reloads the document under an exclusive
//! lock, adds one record and atomically replaces the file, so records
//! appended by other processes in between are kept.
//!
//! Records are never reordered, deduplicated, truncated or compacted.

mod lock;

pub use lock::{lock_path_for, LogLock};

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use nicowatch_types::LogRecord;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Handle to a log file on disk.
///
/// The handle holds no records in memory; every operation goes back to the
/// file.
///
/// # Example
///
/// ```no_run
/// use nicowatch::LogStore;
///
/// let store = LogStore::new("counts.json");
/// let records = store.load()?;
/// println!("{} records", records.len());
/// # Ok::<(), nicowatch::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    /// Create a handle for the given path. Nothing is touched on disk.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a handle and check that an existing log parses.
    ///
    /// A missing file is fine; a corrupt one fails with
    /// [`Error::LogCorrupt`] before anything else is done with it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::new(path);
        let records = store.load()?;
        debug!(path = %store.path.display(), records = records.len(), "log opened");
        Ok(store)
    }

    /// Returns the log path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record in insertion order.
    ///
    /// A missing file yields an empty sequence. Nothing is created on disk:
    /// the shared lock is taken only if a writer already made the lock file.
    /// Writers replace the log by rename, so an unlocked read still sees a
    /// whole document.
    pub fn load(&self) -> Result<Vec<LogRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        match LogLock::open_existing(&self.path)? {
            Some(mut lock) => {
                let _guard = lock.read()?;
                read_records(&self.path)
            }
            None => read_records(&self.path),
        }
    }

    /// True if the log is missing or holds no records.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.load()?.is_empty())
    }

    /// Append one record and persist the whole log.
    ///
    /// The reload, append and rewrite happen under one exclusive lock.
    /// Returns the number of records now in the log.
    pub fn append(&self, record: &LogRecord) -> Result<usize> {
        let mut lock = LogLock::open(&self.path)?;
        let _guard = lock.write()?;

        let mut records = read_records(&self.path)?;
        records.push(record.clone());
        persist(&self.path, &records)?;

        trace!(path = %self.path.display(), records = records.len(), "record appended");
        Ok(records.len())
    }
}

/// Read and parse the log without locking.
fn read_records(path: &Path) -> Result<Vec<LogRecord>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(path, e)),
    };

    serde_json::from_str(&content).map_err(|source| Error::LogCorrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the records to a temp file beside the log, then rename it over
/// the log.
fn persist(path: &Path, records: &[LogRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| Error::io(tmp.path(), e))?;
    }

    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer(&mut writer, records)
            .map_err(|e| Error::io(tmp.path(), io::Error::from(e)))?;
        writer.flush().map_err(|e| Error::io(tmp.path(), e))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| Error::io(tmp.path(), e))?;

    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}
