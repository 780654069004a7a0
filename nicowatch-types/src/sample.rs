//! Sample - one stamped fetch of a content item.

use chrono::{DateTime, Local};

use crate::{Counts, Metadata, Owner, Series, Tag};

/// A point-in-time fetch of a content item.
///
/// The provider supplies the [`Metadata`]; the monitor stamps the capture
/// time when the fetch completes. Samples are immutable once built.
///
/// # Example
///
/// ```rust
/// use chrono::Local;
/// use nicowatch_types::{Counts, Metadata, Owner, Sample};
///
/// let metadata = Metadata {
///     content_id: "sm9".to_string(),
///     title: "Example".to_string(),
///     owner: Owner::new("uploader", "1"),
///     counts: Counts::new(100, 5, 1, 2),
///     series: None,
///     tags: Vec::new(),
/// };
///
/// let sample = Sample::captured(metadata, Local::now());
/// assert_eq!(sample.counts().views, 100);
///
/// // Serialize with serde (requires "serde" feature)
/// // let json = serde_json::to_string(&sample)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Sample {
    /// Provider data for this fetch.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub metadata: Metadata,

    /// Wall-clock time of the fetch.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "datetime", deserialize_with = "crate::compat::captured_at")
    )]
    pub captured_at: DateTime<Local>,
}

/// The persisted form of a [`Sample`].
///
/// A log record is a sample serialized with its capture time; there is no
/// separate schema.
pub type LogRecord = Sample;

impl Sample {
    /// Stamp provider metadata with its capture time.
    pub fn captured(metadata: Metadata, captured_at: DateTime<Local>) -> Self {
        Self {
            metadata,
            captured_at,
        }
    }

    /// Create a builder for constructing samples.
    pub fn builder(content_id: impl Into<String>) -> SampleBuilder {
        SampleBuilder::new(content_id)
    }

    /// Identifier of the content item.
    pub fn content_id(&self) -> &str {
        &self.metadata.content_id
    }

    /// Title at fetch time.
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Publishing account.
    pub fn owner(&self) -> &Owner {
        &self.metadata.owner
    }

    /// Engagement counters.
    pub fn counts(&self) -> &Counts {
        &self.metadata.counts
    }

    /// Series membership, if any.
    pub fn series(&self) -> Option<&Series> {
        self.metadata.series.as_ref()
    }

    /// Tags in display order.
    pub fn tags(&self) -> &[Tag] {
        &self.metadata.tags
    }
}

/// Builder for `Sample` and `Metadata` instances.
#[derive(Debug)]
pub struct SampleBuilder {
    metadata: Metadata,
    captured_at: Option<DateTime<Local>>,
}

impl SampleBuilder {
    /// Create a new builder for the given content item.
    pub fn new(content_id: impl Into<String>) -> Self {
        Self {
            metadata: Metadata {
                content_id: content_id.into(),
                ..Default::default()
            },
            captured_at: None,
        }
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = title.into();
        self
    }

    /// Set the owner.
    pub fn owner(mut self, nickname: impl Into<String>, id: impl Into<String>) -> Self {
        self.metadata.owner = Owner::new(nickname, id);
        self
    }

    /// Set all four counters.
    pub fn counts(mut self, counts: Counts) -> Self {
        self.metadata.counts = counts;
        self
    }

    /// Set the view counter.
    pub fn views(mut self, views: u64) -> Self {
        self.metadata.counts.views = views;
        self
    }

    /// Set series membership.
    pub fn series(
        mut self,
        title: impl Into<String>,
        previous_item_id: Option<&str>,
        next_item_id: Option<&str>,
    ) -> Self {
        self.metadata.series = Some(Series {
            title: title.into(),
            previous_item_id: previous_item_id.map(str::to_string),
            next_item_id: next_item_id.map(str::to_string),
        });
        self
    }

    /// Append a tag.
    pub fn tag(mut self, name: impl Into<String>, locked: bool) -> Self {
        self.metadata.tags.push(Tag::new(name, locked));
        self
    }

    /// Set a specific capture time.
    pub fn captured_at(mut self, at: DateTime<Local>) -> Self {
        self.captured_at = Some(at);
        self
    }

    /// Build the provider metadata only.
    pub fn build_metadata(self) -> Metadata {
        self.metadata
    }

    /// Build the sample, stamping the current time if none was set.
    pub fn build(self) -> Sample {
        Sample {
            metadata: self.metadata,
            captured_at: self.captured_at.unwrap_or_else(Local::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 1, h, m, s)
            .single()
            .unwrap()
    }

    #[test]
    fn builder_sets_all_fields() {
        let sample = Sample::builder("sm9")
            .title("Title")
            .owner("nick", "7")
            .counts(Counts::new(1, 2, 3, 4))
            .series("Series", Some("sm8"), None)
            .tag("a", false)
            .tag("b", true)
            .captured_at(at(12, 0, 0))
            .build();

        assert_eq!(sample.content_id(), "sm9");
        assert_eq!(sample.title(), "Title");
        assert_eq!(sample.owner().nickname, "nick");
        assert_eq!(sample.counts(), &Counts::new(1, 2, 3, 4));
        let series = sample.series().unwrap();
        assert_eq!(series.previous_item_id.as_deref(), Some("sm8"));
        assert!(series.next_item_id.is_none());
        assert_eq!(sample.tags().len(), 2);
        assert!(sample.tags()[1].locked);
        assert_eq!(sample.captured_at, at(12, 0, 0));
    }

    #[test]
    fn captured_keeps_metadata() {
        let metadata = Sample::builder("so1").views(42).build_metadata();
        let sample = Sample::captured(metadata.clone(), at(1, 2, 3));
        assert_eq!(sample.metadata, metadata);
        assert_eq!(sample.counts().views, 42);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let sample = Sample::builder("sm9")
            .title("タイトル")
            .owner("nick", "7")
            .counts(Counts::new(10, 2, 1, 3))
            .series("Series", None, Some("sm10"))
            .tag("locked", true)
            .tag("open", false)
            .captured_at(at(8, 30, 15))
            .build();

        let json = serde_json::to_string(&sample).unwrap();
        let parsed: Sample = serde_json::from_str(&json).unwrap();

        assert_eq!(sample, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_record_is_flat() {
        let sample = Sample::builder("sm9").captured_at(at(0, 0, 0)).build();
        let value = serde_json::to_value(&sample).unwrap();

        assert_eq!(value["contentId"], "sm9");
        assert!(value["capturedAt"].is_string());
        assert!(value.get("metadata").is_none());
        assert_eq!(value["counts"]["views"], 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reads_legacy_record() {
        let json = r#"{
            "videoid": "sm9",
            "title": "old",
            "owner": {"nickname": "nick", "id": 123},
            "counts": {"views": 5, "comments": 1, "mylists": 0, "likes": 2},
            "series": null,
            "tags": [{"name": "t", "locked": true}],
            "datetime": "2024-03-01 12:34:56.789012"
        }"#;

        let record: LogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.content_id(), "sm9");
        assert_eq!(record.owner().id, "123");
        assert_eq!(record.counts().likes, 2);
        let time = record.captured_at.naive_local();
        assert_eq!(time.format("%H:%M:%S").to_string(), "12:34:56");
    }
}
