//! # nicowatch
//!
//! Watch a nicovideo item's counters, score their growth, and replay the
//! history.
//!
//! The crate polls one content item on a fixed interval, derives deltas, a
//! weighted score, a growth rate and milestone status from consecutive
//! samples, and optionally appends every sample to a JSON log that several
//! processes can share. The log can later be replayed with the same
//! comparison rules.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          monitor                             │
//! │  ┌──────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │ provider │───▶│   data   │───▶│   ui    │───▶│   Sink   │ │
//! │  │ (fetch)  │    │(analyze) │    │(render) │    │          │ │
//! │  └──────────┘    └──────────┘    └─────────┘    └──────────┘ │
//! │        │                              ▲                      │
//! │        ▼                              │                      │
//! │  ┌──────────┐                   ┌──────────┐                 │
//! │  │  store   │──────────────────▶│  replay  │                 │
//! │  │  (log)   │                   │          │                 │
//! │  └──────────┘                   └──────────┘                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`monitor`]**: The live loop ([`Monitor`], [`MonitorConfig`])
//! - **[`data`]**: Pure metrics shared by live and replay: comparisons, points,
//!   speed, running average, milestones
//! - **[`store`]**: The durable log ([`LogStore`]) with cross-process locking
//! - **[`replay`]**: Offline rendering of a log ([`Replay`], [`ReplayConfig`])
//! - **[`ui`]**: Frames of toned lines and the sinks that print them
//! - **[`settings`]**: Layered configuration and validation
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch sm9 every 30 seconds and log each sample
//! nicowatch --video sm9 --interval 30 --log counts.json
//!
//! # Replay the last 20 records of sm9
//! nicowatch --readlog --log counts.json --video sm9 --count 20
//! ```
//!
//! ### As a library: live monitoring
//!
//! ```no_run
//! use std::time::Duration;
//! use nicowatch::{Limit, Monitor, MonitorConfig, TerminalSink, Theme};
//! use nicowatch_provider::nicovideo::NicovideoProvider;
//!
//! # tokio_test::block_on(async {
//! let config = MonitorConfig::new("sm9", Duration::from_secs(10), Limit::AtMost(3), None)?;
//! let provider = NicovideoProvider::builder().build()?;
//! let sink = TerminalSink::stdout(Some(Theme::auto_detect()));
//!
//! let summary = Monitor::new(config, provider, sink)?.run().await?;
//! println!("{} ticks", summary.ticks);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```
//!
//! ### As a library: replay
//!
//! ```no_run
//! use nicowatch::{MemorySink, Replay, ReplayConfig};
//!
//! let mut sink = MemorySink::new();
//! Replay::new(ReplayConfig::new("counts.json")).run(&mut sink)?;
//! for frame in &sink.frames {
//!     print!("{}", frame);
//! }
//! # Ok::<(), nicowatch::Error>(())
//! ```

pub mod data;
pub mod error;
pub mod monitor;
pub mod replay;
pub mod settings;
pub mod store;
pub mod ui;

// Re-export main types for convenience
pub use data::{analyze, compare, Comparison, DerivedMetrics, Milestone, SpeedHistory, Trend};
pub use error::{Error, Result};
pub use monitor::{Monitor, MonitorConfig, RunSummary};
pub use replay::{Replay, ReplayConfig};
pub use settings::{Limit, Overrides, Settings};
pub use store::LogStore;
pub use ui::{Frame, Line, MemorySink, Sink, Span, TerminalSink, Theme, Tone};

pub use nicowatch_types::{Counts, LogRecord, Metadata, Owner, Sample, Series, Tag};
