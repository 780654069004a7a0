//! Content metadata as returned by a provider.

/// Weight of a single view in the points score.
pub const POINTS_PER_VIEW: u128 = 3;
/// Weight of a single comment in the points score.
pub const POINTS_PER_COMMENT: u128 = 9;
/// Weight of a single mylist registration in the points score.
pub const POINTS_PER_MYLIST: u128 = 90;
/// Weight of a single like in the points score.
pub const POINTS_PER_LIKE: u128 = 30;

/// Engagement counters of a content item at one point in time.
///
/// Counters normally only grow, but corrections on the remote side can make
/// them shrink between two fetches. Nothing in this type assumes
/// monotonicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counts {
    /// Number of plays.
    pub views: u64,
    /// Number of comments posted.
    pub comments: u64,
    /// Number of times the item was saved to a mylist.
    pub mylists: u64,
    /// Number of likes.
    pub likes: u64,
}

impl Counts {
    /// Create counters from the four raw values.
    pub const fn new(views: u64, comments: u64, mylists: u64, likes: u64) -> Self {
        Self {
            views,
            comments,
            mylists,
            likes,
        }
    }

    /// Weighted engagement score.
    ///
    /// `views*3 + comments*9 + mylists*90 + likes*30`, widened so that any
    /// combination of counters fits.
    pub const fn points(&self) -> u128 {
        self.views as u128 * POINTS_PER_VIEW
            + self.comments as u128 * POINTS_PER_COMMENT
            + self.mylists as u128 * POINTS_PER_MYLIST
            + self.likes as u128 * POINTS_PER_LIKE
    }
}

/// The account that published the content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Owner {
    /// Display name.
    pub nickname: String,
    /// Account identifier. Older logs stored this as a number.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::compat::string_or_number")
    )]
    pub id: String,
}

impl Owner {
    /// Create an owner.
    pub fn new(nickname: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            id: id.into(),
        }
    }
}

/// Series membership of a content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Series {
    /// Series title.
    pub title: String,
    /// Identifier of the item before this one in the series.
    #[cfg_attr(feature = "serde", serde(default))]
    pub previous_item_id: Option<String>,
    /// Identifier of the item after this one in the series.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next_item_id: Option<String>,
}

/// A tag attached to a content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag {
    /// Tag text.
    pub name: String,
    /// Whether the tag is locked against editing by viewers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub locked: bool,
}

impl Tag {
    /// Create a tag.
    pub fn new(name: impl Into<String>, locked: bool) -> Self {
        Self {
            name: name.into(),
            locked,
        }
    }
}

/// Everything a provider knows about a content item, without the capture
/// time. The monitor turns this into a [`Sample`](crate::Sample).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Metadata {
    /// Stable identifier of the content item (e.g. `sm9`).
    #[cfg_attr(feature = "serde", serde(alias = "videoid"))]
    pub content_id: String,
    /// Title at fetch time.
    pub title: String,
    /// Publishing account.
    pub owner: Owner,
    /// Engagement counters.
    pub counts: Counts,
    /// Series membership, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub series: Option<Series>,
    /// Tags in display order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Tag>,
}
