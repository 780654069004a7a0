//! Layered settings: built-in defaults, an optional TOML file, the
//! environment, then command-line flags.
//!
//! ```toml
//! interval = 30
//! count = -1
//! log = "counts.json"
//! derive_speed = false
//! color = true
//! ```
//!
//! Every key can also be set through a `NICOWATCH_` variable, e.g.
//! `NICOWATCH_INTERVAL=30`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::monitor::MonitorConfig;
use crate::replay::ReplayConfig;

/// Default poll interval in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 10;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "NICOWATCH";

/// Bound on ticks (live) or records shown (replay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    #[default]
    Unbounded,
    /// At most this many; always at least one.
    AtMost(usize),
}

impl Limit {
    /// Parse the command-line form: `-1` is unbounded, any positive number
    /// is a bound, everything else is rejected.
    pub fn from_count(count: i64) -> Result<Self> {
        match count {
            -1 => Ok(Limit::Unbounded),
            n if n >= 1 => usize::try_from(n)
                .map(Limit::AtMost)
                .map_err(|_| Error::Config(format!("count {} is too large", n))),
            n => Err(Error::Config(format!(
                "count must be -1 (unbounded) or at least 1, got {}",
                n
            ))),
        }
    }

    /// True once `done` has reached the bound.
    pub fn reached(&self, done: usize) -> bool {
        match self {
            Limit::Unbounded => false,
            Limit::AtMost(n) => done >= *n,
        }
    }

    /// The last items allowed by the bound, in original order.
    pub fn tail<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self {
            Limit::Unbounded => items,
            Limit::AtMost(n) => &items[items.len().saturating_sub(*n)..],
        }
    }
}

/// Settings shared by both modes after all layers are merged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Poll interval in seconds.
    pub interval: u64,
    /// Tick or record limit, `-1` for unbounded.
    pub count: i64,
    /// Log path; logging is off without one.
    pub log: Option<PathBuf>,
    /// Derive replay speed from capture timestamps.
    pub derive_speed: bool,
    /// Colored terminal output.
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL_SECS,
            count: -1,
            log: None,
            derive_speed: false,
            color: true,
        }
    }
}

/// Values given on the command line. They win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub interval: Option<u64>,
    pub count: Option<i64>,
    pub log: Option<PathBuf>,
    pub derive_speed: Option<bool>,
    pub color: Option<bool>,
}

impl Settings {
    /// Merge defaults, the optional file, the environment and `overrides`.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("interval", overrides.interval)?
            .set_override_option("count", overrides.count)?
            .set_override_option(
                "log",
                overrides
                    .log
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .set_override_option("derive_speed", overrides.derive_speed)?
            .set_override_option("color", overrides.color)?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validated poll interval.
    pub fn interval(&self) -> Result<Duration> {
        if self.interval < 1 {
            return Err(Error::Config(format!(
                "interval must be at least 1 second, got {}",
                self.interval
            )));
        }
        Ok(Duration::from_secs(self.interval))
    }

    /// Validated limit.
    pub fn limit(&self) -> Result<Limit> {
        Limit::from_count(self.count)
    }

    /// Build the configuration of a live run.
    pub fn monitor_config(&self, content_id: impl Into<String>) -> Result<MonitorConfig> {
        MonitorConfig::new(
            content_id,
            self.interval()?,
            self.limit()?,
            self.log.clone(),
        )
    }

    /// Build the configuration of a replay.
    ///
    /// The replayed log is the one given explicitly, falling back to the
    /// configured `log`.
    pub fn replay_config(
        &self,
        log: Option<PathBuf>,
        filter: Option<String>,
    ) -> Result<ReplayConfig> {
        let path = log
            .or_else(|| self.log.clone())
            .ok_or_else(|| Error::Config("replay needs a log path".to_string()))?;
        Ok(ReplayConfig {
            path,
            filter,
            limit: self.limit()?,
            derive_speed: self.derive_speed,
        })
    }
}
