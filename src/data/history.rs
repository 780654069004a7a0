//! Session history of growth-rate values for the running average.

/// Ordered speeds computed so far in a session.
///
/// Unlike a sparkline buffer this is never capped: the running average is
/// defined over every speed of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeedHistory {
    speeds: Vec<f64>,
}

impl SpeedHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a speed computed for the current tick.
    pub fn record(&mut self, speed: f64) {
        self.speeds.push(speed);
    }

    /// Number of recorded speeds.
    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    /// All recorded speeds, oldest first.
    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    /// Most recent speed.
    pub fn last(&self) -> Option<f64> {
        self.speeds.last().copied()
    }

    /// Arithmetic mean of every recorded speed.
    ///
    /// Returns None if nothing has been recorded.
    pub fn average(&self) -> Option<f64> {
        mean(&self.speeds)
    }

    /// Mean of every recorded speed plus `next`, without recording it.
    pub fn average_with(&self, next: f64) -> f64 {
        let total: f64 = self.speeds.iter().sum::<f64>() + next;
        total / (self.speeds.len() + 1) as f64
    }
}

impl From<Vec<f64>> for SpeedHistory {
    fn from(speeds: Vec<f64>) -> Self {
        Self { speeds }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
