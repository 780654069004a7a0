//! Offline replay of a log.
//!
//! Records are rendered with the same comparison rule as the live monitor,
//! each one against the record shown before it. Replay does not know the
//! poll interval the records were taken at, so it shows no speed unless
//! asked to derive one from capture timestamps.

use std::path::PathBuf;
use std::time::Duration;

use nicowatch_types::LogRecord;
use tracing::{debug, info, warn};

use crate::data::{analyze, SpeedHistory};
use crate::error::{Error, Result};
use crate::settings::Limit;
use crate::store::LogStore;
use crate::ui::{render, Frame, Sink};

/// Shortest capture gap a derived speed is computed over.
pub const MIN_DERIVED_INTERVAL: Duration = Duration::from_secs(1);

/// What to replay and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    pub path: PathBuf,
    /// Only records of this content id are shown.
    pub filter: Option<String>,
    /// Show only the last N records, counted after filtering.
    pub limit: Limit,
    /// Derive speed from the capture time gap between consecutive records
    /// of the same content id.
    pub derive_speed: bool,
}

impl ReplayConfig {
    /// Replay every record of the log, without speed.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            filter: None,
            limit: Limit::Unbounded,
            derive_speed: false,
        }
    }
}

/// Renders the records of a log.
#[derive(Debug, Clone)]
pub struct Replay {
    config: ReplayConfig,
}

impl Replay {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Load the log and render the selected records.
    ///
    /// A missing log or one without records is [`Error::LogUnavailable`].
    pub fn frames(&self) -> Result<Vec<Frame>> {
        let store = LogStore::new(&self.config.path);
        let records = store.load()?;
        if records.is_empty() {
            return Err(Error::LogUnavailable {
                path: self.config.path.clone(),
            });
        }

        let selected = self.select(&records);
        debug!(
            total = records.len(),
            selected = selected.len(),
            filter = ?self.config.filter,
            "records selected"
        );
        if selected.is_empty() {
            if let Some(id) = &self.config.filter {
                warn!(
                    path = %self.config.path.display(),
                    content_id = %id,
                    "no records match the content id"
                );
            }
        }
        Ok(self.render_all(&selected))
    }

    /// Render the selected records and emit them in order.
    pub fn run<S: Sink>(&self, sink: &mut S) -> Result<Vec<Frame>> {
        let frames = self.frames()?;
        for frame in &frames {
            sink.emit(frame)?;
        }
        info!(path = %self.config.path.display(), frames = frames.len(), "replay finished");
        Ok(frames)
    }

    /// Filter by content id, then keep the tail.
    fn select<'a>(&self, records: &'a [LogRecord]) -> Vec<&'a LogRecord> {
        let matching: Vec<&LogRecord> = records
            .iter()
            .filter(|r| match &self.config.filter {
                Some(id) => r.content_id() == id,
                None => true,
            })
            .collect();
        self.config.limit.tail(&matching).to_vec()
    }

    fn render_all(&self, records: &[&LogRecord]) -> Vec<Frame> {
        let mut frames = Vec::with_capacity(records.len());
        let mut previous: Option<&LogRecord> = None;
        let mut history = SpeedHistory::new();

        for &record in records {
            let interval = previous.and_then(|prev| self.derived_interval(prev, record));
            let metrics = analyze(
                record.counts(),
                previous.map(LogRecord::counts),
                &history,
                interval,
            );
            if let Some(speed) = metrics.speed {
                history.record(speed);
            }

            frames.push(render(record, previous, &metrics));
            previous = Some(record);
        }
        frames
    }

    /// Capture gap to use as the speed interval, when speed is derived.
    fn derived_interval(&self, previous: &LogRecord, current: &LogRecord) -> Option<Duration> {
        if !self.config.derive_speed || previous.content_id() != current.content_id() {
            return None;
        }
        let gap = (current.captured_at - previous.captured_at).to_std().ok();
        match gap {
            Some(gap) if gap >= MIN_DERIVED_INTERVAL => Some(gap),
            _ => {
                warn!(
                    content_id = %current.content_id(),
                    previous = %previous.captured_at,
                    current = %current.captured_at,
                    "capture gap too short for a speed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MemorySink;
    use chrono::{DateTime, Local, TimeZone};
    use nicowatch_types::{Counts, Sample};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn at(second: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 1, 12, 0, second)
            .single()
            .unwrap()
    }

    fn record(id: &str, views: u64, second: u32) -> LogRecord {
        Sample::builder(id)
            .title(format!("title {}", id))
            .owner("nick", "1")
            .counts(Counts::new(views, 0, 0, 0))
            .captured_at(at(second))
            .build()
    }

    fn log_with(records: &[LogRecord]) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        let store = LogStore::new(&path);
        for r in records {
            store.append(r).unwrap();
        }
        (dir, path)
    }

    fn banners(frames: &[Frame]) -> Vec<String> {
        frames.iter().map(|f| f.lines[0].to_string()).collect()
    }

    #[test]
    fn missing_log_is_unavailable() {
        let dir = tempdir().unwrap();
        let replay = Replay::new(ReplayConfig::new(dir.path().join("absent.json")));
        assert!(matches!(replay.frames(), Err(Error::LogUnavailable { .. })));
    }

    #[test]
    fn empty_log_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, "[]").unwrap();

        let replay = Replay::new(ReplayConfig::new(&path));
        assert!(matches!(replay.frames(), Err(Error::LogUnavailable { .. })));
    }

    #[test]
    fn corrupt_log_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, "garbage").unwrap();

        let replay = Replay::new(ReplayConfig::new(&path));
        assert!(matches!(replay.frames(), Err(Error::LogCorrupt { .. })));
    }

    #[test]
    fn deltas_against_previous_record() {
        let (_dir, path) = log_with(&[record("sm9", 100, 0), record("sm9", 150, 10)]);
        let frames = Replay::new(ReplayConfig::new(&path)).frames().unwrap();

        assert_eq!(frames.len(), 2);
        let first = frames[0].to_string();
        let second = frames[1].to_string();
        assert!(first.contains("Views   : 100\n"));
        assert!(second.contains("Views   : 150 (+50)"));
        assert!(second.contains("Points  : 450 (+150)"));
        assert!(!second.contains("Speed"));
    }

    #[test]
    fn filter_then_tail() {
        let (_dir, path) = log_with(&[
            record("sm1", 1, 0),
            record("sm9", 2, 1),
            record("sm1", 3, 2),
            record("sm9", 4, 3),
            record("sm9", 5, 4),
            record("sm1", 6, 5),
        ]);
        let config = ReplayConfig {
            filter: Some("sm9".to_string()),
            limit: Limit::AtMost(2),
            ..ReplayConfig::new(&path)
        };

        let frames = Replay::new(config).frames().unwrap();

        assert_eq!(
            banners(&frames),
            vec![
                "--- nicowatch: 2024-03-01 12:00:03 @ sm9 ---",
                "--- nicowatch: 2024-03-01 12:00:04 @ sm9 ---",
            ]
        );
        // The first shown record has no predecessor.
        assert!(frames[0].to_string().contains("Views   : 4\n"));
        assert!(frames[1].to_string().contains("Views   : 5 (+1)"));
    }

    #[test]
    fn filter_without_matches_yields_no_frames() {
        let (_dir, path) = log_with(&[record("sm1", 1, 0), record("sm1", 2, 1)]);
        let replay = Replay::new(ReplayConfig {
            filter: Some("sm9".to_string()),
            ..ReplayConfig::new(&path)
        });

        let mut sink = MemorySink::new();
        let frames = replay.run(&mut sink).unwrap();

        assert!(frames.is_empty());
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn maximal_counters_replay() {
        let (_dir, path) = log_with(&[
            record("sm9", u64::MAX - 1, 0),
            record("sm9", u64::MAX, 10),
        ]);
        let frames = Replay::new(ReplayConfig {
            derive_speed: true,
            ..ReplayConfig::new(&path)
        })
        .frames()
        .unwrap();

        let first = frames[0].to_string();
        let second = frames[1].to_string();
        assert!(first.contains("Views   : 18,446,744,073,709,551,614\n"));
        assert!(second.contains("Views   : 18,446,744,073,709,551,615 (+1)"));
        assert!(second.contains("Points  : 55,340,232,221,128,654,845 (+3)"));
        // 1 view over 10s: 1 * 500 / 10 = 50
        assert!(second.contains("Speed   : 50.00\n"));
    }

    #[test]
    fn replay_is_idempotent() {
        let (_dir, path) = log_with(&[
            record("sm9", 1, 0),
            record("sm9", 3, 10),
            record("sm9", 2, 20),
        ]);
        let replay = Replay::new(ReplayConfig {
            limit: Limit::AtMost(2),
            ..ReplayConfig::new(&path)
        });

        let mut first = MemorySink::new();
        let mut second = MemorySink::new();
        replay.run(&mut first).unwrap();
        replay.run(&mut second).unwrap();

        assert_eq!(replay.config().limit, Limit::AtMost(2));
        assert_eq!(first.frames.len(), 2);
        assert_eq!(first.frames, second.frames);
    }

    #[test]
    fn derived_speed_uses_capture_gap() {
        // 10 views over 10s: 10 * 500 / 10 = 500
        let (_dir, path) = log_with(&[
            record("sm9", 0, 0),
            record("sm9", 10, 10),
            record("sm9", 10, 10),
        ]);
        let frames = Replay::new(ReplayConfig {
            derive_speed: true,
            ..ReplayConfig::new(&path)
        })
        .frames()
        .unwrap();

        assert!(!frames[0].to_string().contains("Speed"));
        assert!(frames[1].to_string().contains("Speed   : 500.00\n"));
        assert!(frames[1].to_string().contains("Average : 500.00\n"));
        // zero gap: no speed
        assert!(!frames[2].to_string().contains("Speed"));
    }

    #[test]
    fn derived_speed_skips_other_content() {
        let (_dir, path) = log_with(&[record("sm1", 0, 0), record("sm9", 10, 10)]);
        let frames = Replay::new(ReplayConfig {
            derive_speed: true,
            ..ReplayConfig::new(&path)
        })
        .frames()
        .unwrap();

        assert!(!frames[1].to_string().contains("Speed"));
    }

    #[test]
    fn legacy_log_replays() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(
            &path,
            r#"[{"videoid":"sm9","title":"old","owner":{"nickname":"n","id":1},
                "counts":{"views":10,"comments":0,"mylists":0,"likes":0},
                "series":null,"tags":[{"name":"t","locked":true}],
                "datetime":"2021-05-01 10:00:00.123456"}]"#,
        )
        .unwrap();

        let frames = Replay::new(ReplayConfig::new(&path)).frames().unwrap();
        let text = frames[0].to_string();

        assert!(text.starts_with("--- nicowatch: 2021-05-01 10:00:00 @ sm9 ---"));
        assert!(text.contains("Owner: n [ID: 1]"));
        assert!(text.contains("Tag: t [Locked]"));
    }
}
