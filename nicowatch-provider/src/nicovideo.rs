//! nicovideo provider using the guest watch API.
//!
//! This provider reads a video's metadata from the same JSON endpoint the
//! watch page uses for signed-out viewers. No credentials are needed.
//!
//! ## Data Collected
//!
//! - **Title and owner**: uploader nickname and id, or the channel for channel videos
//! - **Counters**: views, comments, mylists and likes
//! - **Series**: series title with the previous/next video ids
//! - **Tags**: tag names with their lock flag, in display order
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use nicowatch_provider::nicovideo::NicovideoProvider;
//! use nicowatch_provider::MetadataProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = NicovideoProvider::builder()
//!         .endpoint("https://www.nicovideo.jp")
//!         .timeout(Duration::from_secs(5))
//!         .build()?;
//!
//!     let metadata = provider.fetch("sm9").await?;
//!
//!     for tag in &metadata.tags {
//!         println!("{} locked={}", tag.name, tag.locked);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use nicowatch_types::{Counts, Metadata, Owner, Series, Tag};

use crate::{MetadataProvider, ProviderError};

/// Frontend id the watch page sends with guest API calls.
const FRONTEND_ID: &str = "6";
const FRONTEND_VERSION: &str = "0";

/// Provider backed by the nicovideo guest watch API.
#[derive(Debug, Clone)]
pub struct NicovideoProvider {
    client: Client,
    endpoint: String,
    description: String,
}

impl NicovideoProvider {
    /// Create a new builder for configuring the provider.
    pub fn builder() -> NicovideoProviderBuilder {
        NicovideoProviderBuilder::default()
    }

    /// Returns the API endpoint in use.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_watch(&self, content_id: &str) -> Result<WatchData, ProviderError> {
        let url = format!(
            "{}/api/watch/v3_guest/{}",
            self.endpoint,
            urlencoded(content_id)
        );
        let track_id = action_track_id(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
        );

        debug!(%url, "fetching watch data");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("_frontendId", FRONTEND_ID),
                ("_frontendVersion", FRONTEND_VERSION),
                ("actionTrackId", track_id.as_str()),
            ])
            .header("X-Frontend-Id", FRONTEND_ID)
            .header("X-Frontend-Version", FRONTEND_VERSION)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN | StatusCode::GONE => {
                return Err(ProviderError::NotFound(content_id.to_string()));
            }
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
                return Err(ProviderError::RateLimited);
            }
            status if !status.is_success() => {
                return Err(ProviderError::Http(format!("API returned status {}", status)));
            }
            _ => {}
        }

        let envelope: WatchEnvelope = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl MetadataProvider for NicovideoProvider {
    async fn fetch(&self, content_id: &str) -> Result<Metadata, ProviderError> {
        let data = self.fetch_watch(content_id).await?;
        Ok(data.into_metadata())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for NicovideoProvider.
#[derive(Debug, Default)]
pub struct NicovideoProviderBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl NicovideoProviderBuilder {
    /// Set the API endpoint (default: "https://www.nicovideo.jp").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the provider.
    pub fn build(self) -> Result<NicovideoProvider, ProviderError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| concat!("nicowatch/", env!("CARGO_PKG_VERSION")).to_string());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| "https://www.nicovideo.jp".to_string())
            .trim_end_matches('/')
            .to_string();
        let description = format!("nicovideo: {}", endpoint);

        Ok(NicovideoProvider {
            client,
            endpoint,
            description,
        })
    }
}

// URL encode a content id for use in a path segment
fn urlencoded(s: &str) -> String {
    s.replace('%', "%25")
        .replace('/', "%2F")
        .replace('?', "%3F")
}

/// Build an `actionTrackId`: ten alphanumeric characters, an underscore,
/// and the request time in milliseconds.
fn action_track_id(now_ms: u128) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let mut state = (now_ms as u64) ^ 0x9e37_79b9_7f4a_7c15;
    let prefix: String = (0..10)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            ALPHABET[(state % ALPHABET.len() as u64) as usize] as char
        })
        .collect();

    format!("{}_{}", prefix, now_ms)
}

#[derive(Debug, Deserialize)]
struct WatchEnvelope {
    data: WatchData,
}

#[derive(Debug, Deserialize)]
struct WatchData {
    video: VideoInfo,
    #[serde(default)]
    owner: Option<OwnerInfo>,
    #[serde(default)]
    channel: Option<ChannelInfo>,
    #[serde(default)]
    series: Option<SeriesInfo>,
    #[serde(default)]
    tag: Option<TagInfo>,
}

impl WatchData {
    fn into_metadata(self) -> Metadata {
        let owner = match (self.owner, self.channel) {
            (Some(owner), _) => {
                let id = match owner.id {
                    serde_json::Value::String(id) => id,
                    other => other.to_string(),
                };
                Owner::new(owner.nickname.unwrap_or_default(), id)
            }
            (None, Some(channel)) => Owner::new(channel.name, channel.id),
            (None, None) => Owner::default(),
        };

        let series = self.series.map(|s| {
            let (previous_item_id, next_item_id) = match s.video {
                Some(links) => (links.prev.map(|v| v.id), links.next.map(|v| v.id)),
                None => (None, None),
            };
            Series {
                title: s.title,
                previous_item_id,
                next_item_id,
            }
        });

        let tags = self
            .tag
            .map(|t| {
                t.items
                    .into_iter()
                    .map(|i| Tag::new(i.name, i.is_locked))
                    .collect()
            })
            .unwrap_or_default();

        Metadata {
            content_id: self.video.id,
            title: self.video.title,
            owner,
            counts: Counts::new(
                self.video.count.view,
                self.video.count.comment,
                self.video.count.mylist,
                self.video.count.like,
            ),
            series,
            tags,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideoInfo {
    id: String,
    title: String,
    count: CountInfo,
}

#[derive(Debug, Deserialize)]
struct CountInfo {
    #[serde(default)]
    view: u64,
    #[serde(default)]
    comment: u64,
    #[serde(default)]
    mylist: u64,
    #[serde(default)]
    like: u64,
}

#[derive(Debug, Deserialize)]
struct OwnerInfo {
    id: serde_json::Value,
    #[serde(default)]
    nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelInfo {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SeriesInfo {
    title: String,
    #[serde(default)]
    video: Option<SeriesLinks>,
}

#[derive(Debug, Deserialize)]
struct SeriesLinks {
    #[serde(default)]
    prev: Option<LinkedVideo>,
    #[serde(default)]
    next: Option<LinkedVideo>,
}

#[derive(Debug, Deserialize)]
struct LinkedVideo {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TagInfo {
    #[serde(default)]
    items: Vec<TagItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagItem {
    name: String,
    #[serde(default)]
    is_locked: bool,
}
