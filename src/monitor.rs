//! The live monitor loop.
//!
//! One tick fetches the item's metadata, stamps it, derives the metrics
//! against the previous sample, hands the rendered frame to the sink and,
//! when logging is on, appends the sample to the log. Ticks repeat on a
//! fixed interval until the tick limit is reached or an error occurs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Local;
use nicowatch_provider::MetadataProvider;
use nicowatch_types::Sample;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::data::{analyze, SpeedHistory};
use crate::error::{Error, Result};
use crate::settings::Limit;
use crate::store::LogStore;
use crate::ui::{render, Frame, Line, Sink, Tone};

/// Validated configuration of one live run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    content_id: String,
    interval: Duration,
    limit: Limit,
    log: Option<PathBuf>,
}

impl MonitorConfig {
    /// Rejects an empty content id and intervals under one second.
    pub fn new(
        content_id: impl Into<String>,
        interval: Duration,
        limit: Limit,
        log: Option<PathBuf>,
    ) -> Result<Self> {
        let content_id = content_id.into();
        if content_id.trim().is_empty() {
            return Err(Error::Config("content id must not be empty".to_string()));
        }
        if interval < Duration::from_secs(1) {
            return Err(Error::Config(format!(
                "interval must be at least 1 second, got {:?}",
                interval
            )));
        }
        if let Limit::AtMost(0) = limit {
            return Err(Error::Config("tick limit must be at least 1".to_string()));
        }
        Ok(Self {
            content_id,
            interval,
            limit,
            log,
        })
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn limit(&self) -> Limit {
        self.limit
    }

    pub fn log(&self) -> Option<&Path> {
        self.log.as_deref()
    }
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub ticks: usize,
    pub records_written: usize,
}

/// Polls one content item and reports its growth.
pub struct Monitor<P, S> {
    config: MonitorConfig,
    provider: P,
    sink: S,
    store: Option<LogStore>,
}

impl<P: MetadataProvider, S: Sink> Monitor<P, S> {
    /// Create a monitor.
    ///
    /// An existing log is parsed here, so a corrupt one fails before the
    /// first fetch.
    pub fn new(config: MonitorConfig, provider: P, sink: S) -> Result<Self> {
        let store = config.log().map(LogStore::open).transpose()?;
        Ok(Self {
            config,
            provider,
            sink,
            store,
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Consume the monitor and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run ticks until the limit is reached.
    ///
    /// Fetch, log and output failures end the run immediately.
    pub async fn run(&mut self) -> Result<RunSummary> {
        let interval = self.config.interval;
        let mut summary = RunSummary::default();
        let mut previous: Option<Sample> = None;
        let mut history = SpeedHistory::new();

        info!(
            content_id = %self.config.content_id,
            interval_secs = interval.as_secs(),
            limit = ?self.config.limit,
            log = ?self.config.log,
            provider = self.provider.description(),
            "monitor started"
        );
        if self.store.is_some() {
            let mut notice = Frame::new();
            notice.push(Line::styled("Logging enabled.", Tone::Notice));
            self.sink.emit(&notice)?;
        }

        loop {
            let tick_start = Instant::now();

            let metadata = self.provider.fetch(&self.config.content_id).await?;
            let sample = Sample::captured(metadata, Local::now());

            let metrics = analyze(
                sample.counts(),
                previous.as_ref().map(Sample::counts),
                &history,
                Some(interval),
            );
            if let Some(deltas) = metrics.deltas.filter(|d| d.has_correction()) {
                warn!(content_id = %sample.content_id(), ?deltas, "counter went down");
            }
            if let Some(speed) = metrics.speed {
                history.record(speed);
            }

            let frame = render(&sample, previous.as_ref(), &metrics);
            self.sink.emit(&frame)?;

            if let Some(store) = &self.store {
                store.append(&sample)?;
                summary.records_written += 1;
            }
            summary.ticks += 1;

            debug!(
                tick = summary.ticks,
                views = sample.counts().views,
                points = %metrics.points,
                speed = ?metrics.speed,
                "tick complete"
            );

            if self.config.limit.reached(summary.ticks) {
                break;
            }

            previous = Some(sample);
            sleep_until(tick_start + interval).await;
        }

        info!(
            ticks = summary.ticks,
            records = summary.records_written,
            "monitor finished"
        );
        Ok(summary)
    }
}
