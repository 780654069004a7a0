//! Output sinks for rendered frames.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};

use super::line::{Frame, Span};
use super::theme::Theme;
use crate::error::{Error, Result};

/// Destination for rendered frames.
///
/// A frame is emitted whole; sinks must not interleave two frames.
pub trait Sink {
    fn emit(&mut self, frame: &Frame) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, frame: &Frame) -> Result<()> {
        (**self).emit(frame)
    }
}

/// Writes frames to a terminal or any other writer.
///
/// Without a theme the output is plain text.
pub struct TerminalSink<W: Write> {
    out: W,
    theme: Option<Theme>,
}

impl TerminalSink<io::Stdout> {
    /// Sink on standard output.
    pub fn stdout(theme: Option<Theme>) -> Self {
        Self::new(io::stdout(), theme)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, theme: Option<Theme>) -> Self {
        Self { out, theme }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_span(&mut self, span: &Span) -> io::Result<()> {
        let style = self.theme.as_ref().and_then(|t| t.style_for(span.tone));
        match style {
            Some(style) => {
                if let Some(color) = style.fg {
                    queue!(self.out, SetForegroundColor(color))?;
                }
                if let Some(attr) = style.attribute() {
                    queue!(self.out, SetAttribute(attr))?;
                }
                queue!(
                    self.out,
                    Print(&span.text),
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )
            }
            None => queue!(self.out, Print(&span.text)),
        }
    }

    fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, Print("\n"))?;
        for line in &frame.lines {
            for span in &line.spans {
                self.write_span(span)?;
            }
            queue!(self.out, Print("\n"))?;
        }
        self.out.flush()
    }
}

impl<W: Write> Sink for TerminalSink<W> {
    fn emit(&mut self, frame: &Frame) -> Result<()> {
        self.write_frame(frame).map_err(Error::Output)
    }
}

/// Collects frames in memory as plain text.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sink for MemorySink {
    fn emit(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::line::{Line, Tone};

    fn frame() -> Frame {
        let mut frame = Frame::new();
        frame.push(Line::styled("== Tags ==", Tone::Heading));
        let locked = Span::styled(" [Locked]", Tone::Locked);
        frame.push(Line::plain("Tag: a").with(locked));
        frame
    }

    #[test]
    fn plain_output_without_theme() {
        let mut sink = TerminalSink::new(Vec::new(), None);
        sink.emit(&frame()).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "\n== Tags ==\nTag: a [Locked]\n");
    }

    #[test]
    fn themed_output_has_escape_sequences() {
        let mut sink = TerminalSink::new(Vec::new(), Some(Theme::dark()));
        sink.emit(&frame()).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("== Tags =="));
        assert!(out.contains(" [Locked]"));
    }

    #[test]
    fn memory_sink_keeps_frames_in_order() {
        let mut sink = MemorySink::new();
        let mut first = Frame::new();
        first.push(Line::plain("one"));
        let mut second = Frame::new();
        second.push(Line::plain("two"));

        sink.emit(&first).unwrap();
        sink.emit(&second).unwrap();

        assert_eq!(sink.frames, vec!["one\n", "two\n"]);
    }
}
