//! Color theme for terminal output.
//!
//! Supports light and dark themes with automatic terminal detection.

use crossterm::style::{Attribute, Color};

use super::line::Tone;

/// How one tone is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// The attribute to set before the text, if any.
    pub fn attribute(&self) -> Option<Attribute> {
        self.bold.then_some(Attribute::Bold)
    }
}

/// Color and style theme for the terminal sink.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Per-tick banner.
    pub banner: Style,
    /// Section headings.
    pub heading: Style,
    /// Positive deltas.
    pub increase: Style,
    /// Negative deltas.
    pub decrease: Style,
    /// Close to a milestone.
    pub imminent: Style,
    /// Informational markers.
    pub notice: Style,
    /// Absent optional data.
    pub missing: Style,
    /// Locked tag marker.
    pub locked: Style,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            banner: Style::fg(Color::Cyan).bold(),
            heading: Style::fg(Color::Cyan),
            increase: Style::fg(Color::Green),
            decrease: Style::fg(Color::Red),
            imminent: Style::fg(Color::Yellow).bold(),
            notice: Style::fg(Color::Blue),
            missing: Style::fg(Color::DarkGrey),
            locked: Style::fg(Color::Magenta),
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            banner: Style::fg(Color::Blue).bold(),
            heading: Style::fg(Color::Blue),
            increase: Style::fg(Color::DarkGreen),
            decrease: Style::fg(Color::DarkRed),
            imminent: Style::fg(Color::DarkYellow).bold(),
            notice: Style::fg(Color::DarkBlue),
            missing: Style::fg(Color::Grey),
            locked: Style::fg(Color::DarkMagenta),
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get the style for a tone. Plain text is never styled.
    pub fn style_for(&self, tone: Tone) -> Option<Style> {
        match tone {
            Tone::Plain => None,
            Tone::Banner => Some(self.banner),
            Tone::Heading => Some(self.heading),
            Tone::Increase => Some(self.increase),
            Tone::Decrease => Some(self.decrease),
            Tone::Imminent => Some(self.imminent),
            Tone::Notice => Some(self.notice),
            Tone::Missing => Some(self.missing),
            Tone::Locked => Some(self.locked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_is_unstyled() {
        assert!(Theme::dark().style_for(Tone::Plain).is_none());
        assert!(Theme::light().style_for(Tone::Plain).is_none());
    }

    #[test]
    fn deltas_use_distinct_colors() {
        let theme = Theme::dark();
        let up = theme.style_for(Tone::Increase).unwrap();
        let down = theme.style_for(Tone::Decrease).unwrap();
        assert_ne!(up.fg, down.fg);
    }

    #[test]
    fn bold_sets_attribute() {
        assert_eq!(Style::fg(Color::Red).attribute(), None);
        assert_eq!(
            Style::fg(Color::Red).bold().attribute(),
            Some(Attribute::Bold)
        );
    }
}
