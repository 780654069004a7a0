//! Styled text model handed to sinks.
//!
//! Lines carry semantic tones rather than colors; the sink's theme decides
//! what a tone looks like.

use std::fmt;

use crate::data::{Comparison, Trend};

/// Semantic highlight of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Plain,
    /// Per-tick banner.
    Banner,
    /// Section heading.
    Heading,
    /// Positive delta.
    Increase,
    /// Negative delta.
    Decrease,
    /// A milestone is close.
    Imminent,
    /// Informational marker.
    Notice,
    /// Absent optional data ("No series.").
    Missing,
    /// Locked tag marker.
    Locked,
}

impl From<Trend> for Tone {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Unchanged => Tone::Plain,
            Trend::Increased => Tone::Increase,
            Trend::Decreased => Tone::Decrease,
        }
    }
}

/// A run of text with one tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Tone::Plain)
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Tone::Plain)
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            spans: vec![Span::styled(text, tone)],
        }
    }

    /// Append a span.
    pub fn with(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }
}

impl From<&Comparison> for Line {
    fn from(c: &Comparison) -> Self {
        let line = Line::plain(format!("{}: {}", c.label, c.value));
        match &c.delta {
            Some(delta) => line.with(Span::styled(format!(" ({})", delta), c.trend.into())),
            None => line,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}

/// Ordered lines for one tick or one replayed record.
///
/// A frame is built completely before it is handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub lines: Vec<Line>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<Line>) {
        self.lines.push(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::compare;

    #[test]
    fn comparison_line_keeps_plain_text() {
        let c = compare("Views", 100u64, Some(80));
        let line = Line::from(&c);

        assert_eq!(line.to_string(), c.to_string());
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[1].tone, Tone::Increase);
    }

    #[test]
    fn unchanged_comparison_is_single_plain_span() {
        let line = Line::from(&compare("Likes", 5u64, Some(5)));
        assert_eq!(line.spans, vec![Span::plain("Likes: 5")]);
    }

    #[test]
    fn decrease_tone() {
        let line = Line::from(&compare("Likes", 4u64, Some(5)));
        assert_eq!(line.spans[1].tone, Tone::Decrease);
        assert_eq!(line.spans[1].text, " (-1)");
    }

    #[test]
    fn frame_display_joins_lines() {
        let mut frame = Frame::new();
        frame.push(Line::plain("a"));
        frame.push(Line::styled("b", Tone::Heading).with(Span::plain("c")));
        assert_eq!(frame.to_string(), "a\nbc\n");
        assert_eq!(frame.len(), 2);
    }
}
