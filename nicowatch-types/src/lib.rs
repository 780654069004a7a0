//! # nicowatch-types
//!
//! Core types for nicowatch. This crate defines the shape of a single fetch
//! of a content item's metadata and engagement counters, and the persisted
//! form of that fetch in the log store.
//!
//! ## Design Goals
//!
//! - **Plain data**: every entity is an explicit struct; nothing is discovered at runtime
//! - **Optional serialization**: enable the `serde` feature for the log schema
//! - **Provider agnostic**: [`Metadata`] is what a provider returns, [`Sample`] is
//!   what the monitor stamps and stores
//! - **Ergonomic builders**: fluent API for constructing samples in adapters and tests
//!
//! ## Features
//!
//! - `serde`: JSON (or any serde format) serialization of the log schema
//!
//! ## Example
//!
//! ```rust
//! use nicowatch_types::{Counts, Sample};
//!
//! let sample = Sample::builder("sm9")
//!     .title("Example video")
//!     .owner("uploader", "12345")
//!     .counts(Counts::new(10, 2, 1, 3))
//!     .tag("music", true)
//!     .build();
//!
//! assert_eq!(sample.content_id(), "sm9");
//! assert_eq!(sample.counts().points(), 228);
//! ```
//!
//! ## Log schema
//!
//! A persisted [`LogRecord`] uses camelCase keys (`contentId`, `capturedAt`,
//! `previousItemId`, ...). Logs written by older versions of the tool, which
//! used `videoid` and a naive `datetime` string, are still readable.

mod metadata;
mod sample;
#[cfg(feature = "serde")]
mod compat;

pub use metadata::*;
pub use sample::*;
