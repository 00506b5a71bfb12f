use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single article decoded from a feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            link: None,
            published_at: None,
        }
    }

    /// Title and body joined by a newline; the only text a heuristic sees.
    pub fn scan_text(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

/// One feed to read, as declared in the subscription file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub url: String,
    #[serde(rename = "urlType")]
    pub feed_type: String,
}

impl Subscription {
    pub fn new(url: impl Into<String>, feed_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            feed_type: feed_type.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    Person,
    Organization,
    Place,
    Other,
}

impl EntityCategory {
    pub fn label(&self) -> &'static str {
        match self {
            EntityCategory::Person => "Person",
            EntityCategory::Organization => "Organization",
            EntityCategory::Place => "Place",
            EntityCategory::Other => "Other",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate entity emitted by a heuristic. Consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityOccurrence {
    pub name: String,
    pub category: EntityCategory,
}

impl EntityOccurrence {
    pub fn new(name: impl Into<String>, category: EntityCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Per-name accumulator. `first_seen` is the insertion index inside its aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub name: String,
    pub category: EntityCategory,
    pub frequency: u64,
    pub first_seen: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedReport {
    pub source: String,
    pub entries: Vec<EntityRecord>,
}

impl FeedReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
    pub min_host_interval_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "FeedReader/2.0".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_seconds: 1,
            max_feed_size_mb: 10,
            max_redirects: 5,
            min_host_interval_ms: 1000,
        }
    }
}

/// Outcome of a whole run over the subscription list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reported: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Unknown feed type: {0}")]
    UnknownFeedType(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("Subscription error: {0}")]
    Subscriptions(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, ReaderError>;
