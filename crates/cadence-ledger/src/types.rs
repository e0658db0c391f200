use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Social network a post targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    Linkedin,
    Facebook,
    Threads,
    Bluesky,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Twitter,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Facebook,
        Platform::Threads,
        Platform::Bluesky,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Linkedin => "linkedin",
            Self::Facebook => "facebook",
            Self::Threads => "threads",
            Self::Bluesky => "bluesky",
        }
    }

    /// Lowercase names accepted on the command line.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown platform: {s}"))
    }
}

/// Lifecycle state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Written but not given a publish time.
    Draft,
    /// Waiting for its `scheduled_at` time.
    Scheduled,
    /// Went out; `published_at` is set.
    Published,
    /// Publishing was attempted and did not succeed.
    Failed,
    /// Withdrawn by the user.
    Cancelled,
}

impl PostStatus {
    pub const ALL: [PostStatus; 5] = [
        PostStatus::Draft,
        PostStatus::Scheduled,
        PostStatus::Published,
        PostStatus::Failed,
        PostStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::as_str).collect()
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown post status: {s}"))
    }
}

/// A persisted post record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub platform: Platform,
    /// ISO-8601 timestamp the post is planned for.
    pub scheduled_at: String,
    pub status: PostStatus,
    /// Free-form tags, typically comma separated.
    pub tags: String,
    /// Empty when the post has no attached media.
    pub media_url: String,
    /// Set iff `status` is [`PostStatus::Published`].
    pub published_at: Option<String>,
    pub created_at: String,
    pub notes: String,
    pub campaign_id: Option<i64>,
}

/// Insert payload for [`crate::Ledger::add_post`].
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub platform: Platform,
    pub scheduled_at: String,
    pub status: PostStatus,
    pub tags: String,
    pub media_url: String,
    pub notes: String,
    pub created_at: String,
}

impl NewPost {
    /// Build a post whose status follows from whether a time was given.
    ///
    /// An explicit `scheduled_at` yields [`PostStatus::Scheduled`]; `None`
    /// yields [`PostStatus::Draft`] with `scheduled_at` filled in as now.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        platform: Platform,
        scheduled_at: Option<String>,
    ) -> Self {
        let now = cadence_core::time::now_timestamp();
        let (scheduled_at, status) = match scheduled_at {
            Some(at) => (at, PostStatus::Scheduled),
            None => (now.clone(), PostStatus::Draft),
        };
        Self {
            title: title.into(),
            content: content.into(),
            platform,
            scheduled_at,
            status,
            tags: String::new(),
            media_url: String::new(),
            notes: String::new(),
            created_at: now,
        }
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = url.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

pub const DEFAULT_CAMPAIGN_STATUS: &str = "active";

/// A named grouping of posts over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    /// Unique across all campaigns.
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub created_at: String,
}

/// Insert payload for [`crate::Ledger::add_campaign`].
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub created_at: String,
}

impl NewCampaign {
    pub fn new(
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            status: DEFAULT_CAMPAIGN_STATUS.to_string(),
            created_at: cadence_core::time::now_timestamp(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Aggregate counts over the whole ledger.
///
/// Buckets with no posts are absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub by_status: BTreeMap<String, u64>,
    pub by_platform: BTreeMap<String, u64>,
    pub total_campaigns: u64,
}

impl Stats {
    pub fn total_posts(&self) -> u64 {
        self.by_status.values().sum()
    }
}

/// Snapshot written by `export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub posts: Vec<Post>,
    pub stats: Stats,
    pub exported_at: String,
}
