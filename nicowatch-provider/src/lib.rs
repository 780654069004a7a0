//! # nicowatch-provider
//!
//! Metadata providers for nicowatch.
//!
//! A provider answers one question: what does a content item look like
//! right now? The monitor calls [`MetadataProvider::fetch`] once per tick and
//! stamps the result with its own capture time.
//!
//! ## Supported Sources
//!
//! - **nicovideo** (`nicovideo` feature) - Reads title, owner, counters, series
//!   and tags from the public guest watch API
//!
//! ## Quick Start (nicovideo)
//!
//! ```rust,no_run
//! use nicowatch_provider::nicovideo::NicovideoProvider;
//! use nicowatch_provider::MetadataProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = NicovideoProvider::builder().build()?;
//!
//!     let metadata = provider.fetch("sm9").await?;
//!
//!     println!("{} has {} views", metadata.title, metadata.counts.views);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

pub mod error;

#[cfg(feature = "nicovideo")]
pub mod nicovideo;

pub use error::ProviderError;

// Re-export types for convenience
pub use nicowatch_types::{Counts, Metadata, Owner, Series, Tag};

/// A source of content metadata.
///
/// Fetches may block for as long as the underlying transport allows and may
/// fail; callers decide whether a failure is fatal.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the current metadata of a content item.
    async fn fetch(&self, content_id: &str) -> Result<Metadata, ProviderError>;

    /// Returns a human-readable description of the provider.
    fn description(&self) -> &str;
}

#[async_trait]
impl<P: MetadataProvider + ?Sized> MetadataProvider for Box<P> {
    async fn fetch(&self, content_id: &str) -> Result<Metadata, ProviderError> {
        (**self).fetch(content_id).await
    }

    fn description(&self) -> &str {
        (**self).description()
    }
}
