//! Differential analytics over consecutive samples.
//!
//! This module turns a sequence of raw counter snapshots into deltas, a
//! weighted score, a growth rate and its running average, and milestone
//! status. Everything here is pure and shared by the live monitor and the
//! replay engine.
//!
//! ## Submodules
//!
//! - [`compare`]: The tri-state comparison rule ([`compare()`], [`Trend`])
//! - [`derived`]: Per-tick metrics ([`analyze`], [`DerivedMetrics`], speed formula)
//! - [`format`]: Thousands-separated counts and two-decimal rates
//! - [`history`]: Session speeds for the running average ([`SpeedHistory`])
//! - [`milestone`]: View-count tiers and imminence ([`Milestone`])
//!
//! ## Data Flow
//!
//! ```text
//! Sample (current) ──┐
//! Sample (previous) ─┼──▶ analyze() ──▶ DerivedMetrics ──▶ ui::render
//! SpeedHistory ──────┘         │
//!                              └──▶ SpeedHistory::record(speed)
//! ```

pub mod compare;
pub mod derived;
pub mod format;
pub mod history;
pub mod milestone;

pub use compare::{compare, Comparison, Measure, Trend};
pub use derived::{analyze, speed, Deltas, DerivedMetrics};
pub use history::SpeedHistory;
pub use milestone::{classify, Milestone};
