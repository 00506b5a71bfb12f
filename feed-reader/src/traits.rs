use crate::types::{Article, EntityOccurrence, Result, Subscription};
use async_trait::async_trait;

/// Lazy sequence of occurrences borrowed from the scanned text.
pub type Occurrences<'a> = Box<dyn Iterator<Item = EntityOccurrence> + 'a>;

/// Text to candidate entities. Implementations are total: empty text gives
/// an empty sequence, and every occurrence is emitted, duplicates included.
pub trait Heuristic: Send + Sync {
    /// Name the heuristic is registered under
    fn name(&self) -> &str;

    fn extract<'a>(&'a self, text: &'a str) -> Occurrences<'a>;

    /// Whether `extract` returns the same occurrences for the same text
    fn is_deterministic(&self) -> bool {
        true
    }
}

/// Trait for downloading a raw feed payload
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get_content(&self, url: &str) -> Result<String>;
}

/// Raw payload to articles, in document order
pub trait FeedDecoder: Send + Sync {
    fn feed_type(&self) -> &str;

    fn parse(&self, payload: &str) -> Result<Vec<Article>>;
}

/// Yields the subscriptions a run should process
pub trait SubscriptionSource {
    fn load(&self) -> Result<Vec<Subscription>>;
}
