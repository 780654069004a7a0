//! Error taxonomy for the monitor, log store and replay engine.

use std::io;
use std::path::PathBuf;

use nicowatch_provider::ProviderError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a live run or a replay.
///
/// None of these are recovered internally: every variant ends the process
/// with a non-zero exit code.
#[derive(Debug, Error)]
pub enum Error {
    /// The log file exists but does not hold a valid record sequence.
    #[error("Log file broken: {}: {source}", path.display())]
    LogCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Replay was asked for a log that is missing or holds no records.
    #[error("Log file not found or empty: {}", path.display())]
    LogUnavailable { path: PathBuf },

    /// Fetching metadata failed.
    #[error("Metadata fetch failed: {0}")]
    Provider(#[from] ProviderError),

    /// Settings were rejected before any work started.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading, writing or locking the log failed.
    #[error("Log I/O failed: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the presentation sink failed.
    #[error("Output failed: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}
