//! Differential metrics derived from consecutive samples.

use std::time::Duration;

use nicowatch_types::Counts;

use super::history::SpeedHistory;
use super::milestone::{classify, Milestone};

/// Rate weight of one additional view.
pub const SPEED_PER_VIEW: i128 = 500;
/// Rate weight of one additional comment.
pub const SPEED_PER_COMMENT: i128 = 5_000;
/// Rate weight of one additional mylist registration.
pub const SPEED_PER_MYLIST: i128 = 20_000;
/// Rate weight of one additional like.
pub const SPEED_PER_LIKE: i128 = 40_000;

/// Per-field change between two samples. Negative values are counter
/// corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deltas {
    pub views: i128,
    pub comments: i128,
    pub mylists: i128,
    pub likes: i128,
}

impl Deltas {
    /// `current - previous` for each counter.
    pub fn between(current: &Counts, previous: &Counts) -> Self {
        Self {
            views: current.views as i128 - previous.views as i128,
            comments: current.comments as i128 - previous.comments as i128,
            mylists: current.mylists as i128 - previous.mylists as i128,
            likes: current.likes as i128 - previous.likes as i128,
        }
    }

    /// True if any counter went down.
    pub fn has_correction(&self) -> bool {
        self.views < 0 || self.comments < 0 || self.mylists < 0 || self.likes < 0
    }

    /// Weighted change, before normalizing by time.
    fn weighted(&self) -> i128 {
        self.views * SPEED_PER_VIEW
            + self.comments * SPEED_PER_COMMENT
            + self.mylists * SPEED_PER_MYLIST
            + self.likes * SPEED_PER_LIKE
    }
}

/// Growth rate of the weighted engagement signal, per second, rounded to two
/// decimals.
///
/// Returns None for a zero interval.
pub fn speed(deltas: &Deltas, interval: Duration) -> Option<f64> {
    let secs = interval.as_secs_f64();
    if secs <= 0.0 {
        return None;
    }
    Some(round2(deltas.weighted() as f64 / secs))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Everything derived for one tick. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    /// Weighted engagement score of the current sample.
    pub points: u128,
    /// Score of the previous sample, if there was one.
    pub previous_points: Option<u128>,
    /// Counter changes since the previous sample.
    pub deltas: Option<Deltas>,
    /// Growth rate for this tick.
    pub speed: Option<f64>,
    /// Growth rate of the tick before, for comparison.
    pub previous_speed: Option<f64>,
    /// Mean of all speeds of the session, this one included.
    pub average_speed: Option<f64>,
    /// Mean of all speeds before this one.
    pub previous_average_speed: Option<f64>,
    /// Position of the view counter relative to the next milestone.
    pub milestone: Option<Milestone>,
}

/// Derive the metrics of `current` given the sample before it and the
/// speeds computed so far.
///
/// `interval` is the configured poll interval, not measured elapsed time.
/// Without a previous sample or an interval no speed is produced. The
/// caller records the returned speed into the history.
pub fn analyze(
    current: &Counts,
    previous: Option<&Counts>,
    history: &SpeedHistory,
    interval: Option<Duration>,
) -> DerivedMetrics {
    let deltas = previous.map(|prev| Deltas::between(current, prev));
    let speed = match (deltas.as_ref(), interval) {
        (Some(d), Some(interval)) => speed(d, interval),
        _ => None,
    };

    DerivedMetrics {
        points: current.points(),
        previous_points: previous.map(Counts::points),
        deltas,
        speed,
        previous_speed: speed.and(history.last()),
        average_speed: speed.map(|s| history.average_with(s)),
        previous_average_speed: speed.and(history.average()),
        milestone: classify(current.views),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_SECONDS: Duration = Duration::from_secs(10);

    #[test]
    fn speed_formula() {
        let d = Deltas {
            views: 100,
            comments: 5,
            mylists: 1,
            likes: 2,
        };
        assert_eq!(speed(&d, TEN_SECONDS), Some(17_500.0));
    }

    #[test]
    fn speed_rounds_to_two_decimals() {
        let d = Deltas {
            views: 1,
            ..Default::default()
        };
        assert_eq!(speed(&d, Duration::from_secs(3)), Some(166.67));
    }

    #[test]
    fn speed_of_zero_interval_is_none() {
        assert!(speed(&Deltas::default(), Duration::ZERO).is_none());
    }

    #[test]
    fn negative_deltas_give_negative_speed() {
        let d = Deltas::between(&Counts::new(90, 0, 0, 0), &Counts::new(100, 0, 0, 0));
        assert!(d.has_correction());
        assert_eq!(speed(&d, TEN_SECONDS), Some(-500.0));
    }

    #[test]
    fn first_sample_has_no_deltas_or_speed() {
        let counts = Counts::new(10, 2, 1, 3);
        let m = analyze(&counts, None, &SpeedHistory::new(), Some(TEN_SECONDS));
        assert_eq!(m.points, 228);
        assert!(m.previous_points.is_none());
        assert!(m.deltas.is_none());
        assert!(m.speed.is_none());
        assert!(m.average_speed.is_none());
        assert_eq!(m.milestone.unwrap().next_threshold, 100_000);
    }

    #[test]
    fn second_sample_has_deltas_and_speed() {
        let prev = Counts::new(1_000, 10, 2, 5);
        let cur = Counts::new(1_100, 15, 3, 7);
        let m = analyze(&cur, Some(&prev), &SpeedHistory::new(), Some(TEN_SECONDS));

        assert_eq!(
            m.deltas,
            Some(Deltas {
                views: 100,
                comments: 5,
                mylists: 1,
                likes: 2,
            })
        );
        assert_eq!(m.previous_points, Some(prev.points()));
        assert_eq!(m.speed, Some(17_500.0));
        assert_eq!(m.average_speed, Some(17_500.0));
        assert!(m.previous_speed.is_none());
        assert!(m.previous_average_speed.is_none());
    }

    #[test]
    fn running_average_against_prior_speeds() {
        // 3 views over 50s: 3 * 500 / 50 = 30.0
        let prev = Counts::new(0, 0, 0, 0);
        let cur = Counts::new(3, 0, 0, 0);
        let history = SpeedHistory::from(vec![10.0, 20.0]);
        let m = analyze(&cur, Some(&prev), &history, Some(Duration::from_secs(50)));

        assert_eq!(m.speed, Some(30.0));
        assert_eq!(m.previous_speed, Some(20.0));
        assert_eq!(m.average_speed, Some(20.0));
        assert_eq!(m.previous_average_speed, Some(15.0));
    }

    #[test]
    fn no_interval_means_no_speed() {
        let m = analyze(
            &Counts::new(2, 0, 0, 0),
            Some(&Counts::new(1, 0, 0, 0)),
            &SpeedHistory::from(vec![5.0]),
            None,
        );
        assert!(m.deltas.is_some());
        assert!(m.speed.is_none());
        assert!(m.average_speed.is_none());
        assert!(m.previous_average_speed.is_none());
    }
}
