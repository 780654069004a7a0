//! The delta comparison rule shared by live monitoring and replay.
//!
//! Every counter, score and rate is shown the same way: the plain value when
//! there is nothing to compare against or nothing changed, otherwise the
//! value followed by its signed delta, tagged with the direction so the
//! presentation layer can highlight it.

use std::fmt;

use super::format::{
    format_count, format_count_delta, format_rate, format_rate_delta, format_unsigned,
};

/// Direction of change relative to the previous value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trend {
    /// Equal to the previous value, or no previous value.
    Unchanged,
    Increased,
    Decreased,
}

/// A value that can be compared and rendered by [`compare`].
pub trait Measure: Copy + PartialOrd {
    /// Render the value itself.
    fn render(self) -> String;

    /// Render `self - previous` with an explicit sign.
    fn render_delta(self, previous: Self) -> String;
}

impl Measure for u64 {
    fn render(self) -> String {
        format_count(self as i128)
    }

    fn render_delta(self, previous: Self) -> String {
        format_count_delta(self as i128 - previous as i128)
    }
}

impl Measure for u128 {
    fn render(self) -> String {
        format_unsigned(self)
    }

    fn render_delta(self, previous: Self) -> String {
        if self >= previous {
            format!("+{}", format_unsigned(self - previous))
        } else {
            format!("-{}", format_unsigned(previous - self))
        }
    }
}

impl Measure for f64 {
    fn render(self) -> String {
        format_rate(self)
    }

    fn render_delta(self, previous: Self) -> String {
        format_rate_delta(self - previous)
    }
}

/// Result of comparing a value against its predecessor.
///
/// `Display` yields the uncolored form, e.g. `Views: 1,234 (+20)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub label: String,
    pub value: String,
    /// Signed delta text, present only when the value changed.
    pub delta: Option<String>,
    pub trend: Trend,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)?;
        if let Some(delta) = &self.delta {
            write!(f, " ({})", delta)?;
        }
        Ok(())
    }
}

/// Compare `value` with `previous` and format the result.
///
/// Decreases are ordinary results, not errors: counters can be corrected
/// downwards by the remote side.
pub fn compare<V: Measure>(label: &str, value: V, previous: Option<V>) -> Comparison {
    let (trend, delta) = match previous {
        Some(prev) if value > prev => (Trend::Increased, Some(value.render_delta(prev))),
        Some(prev) if value < prev => (Trend::Decreased, Some(value.render_delta(prev))),
        _ => (Trend::Unchanged, None),
    };

    Comparison {
        label: label.to_string(),
        value: value.render(),
        delta,
        trend,
    }
}
