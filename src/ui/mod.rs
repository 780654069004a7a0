//! Terminal presentation of samples.
//!
//! Rendering is split from output: [`render`] turns a sample and its
//! metrics into a [`Frame`] of toned lines, and a [`Sink`] decides how those
//! lines reach the user.
//!
//! ## Submodules
//!
//! - [`line`]: The styled text model ([`Frame`], [`Line`], [`Span`], [`Tone`])
//! - [`render`](mod@render): Builds the frame for one sample
//! - [`sink`]: Output destinations ([`TerminalSink`], [`MemorySink`])
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Frame Layout
//!
//! ```text
//! --- nicowatch: 2024-03-01 12:00:00 @ sm9 ---
//! == Metadata ==      title, owner
//! == Counters ==      views, comments, mylists, likes (with deltas)
//! == Analytics ==     points, speed, average, milestone
//! == Series ==        title, previous / next item
//! == Tags ==          one line per tag, locked ones marked
//! ```

pub mod line;
pub mod render;
pub mod sink;
pub mod theme;

pub use line::{Frame, Line, Span, Tone};
pub use render::render;
pub use sink::{MemorySink, Sink, TerminalSink};
pub use theme::Theme;
