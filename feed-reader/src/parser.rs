use crate::text::extract_text_from_html;
use crate::traits::FeedDecoder;
use crate::types::{Article, ReaderError, Result};
use feed_rs::parser;
use std::collections::BTreeMap;
use tracing::{debug, info};

pub type DecoderFactory = fn() -> Box<dyn FeedDecoder>;

fn rss_factory() -> Box<dyn FeedDecoder> {
    Box::new(RssDecoder::rss())
}

fn atom_factory() -> Box<dyn FeedDecoder> {
    Box::new(RssDecoder::atom())
}

/// Maps a subscription's feed type to the decoder for its payloads
pub struct DecoderRegistry {
    factories: BTreeMap<String, DecoderFactory>,
}

impl DecoderRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry with the built-in `rss` and `atom` decoders
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("rss", rss_factory);
        registry.register("atom", atom_factory);
        registry
    }

    pub fn register(&mut self, feed_type: &str, factory: DecoderFactory) {
        debug!("Registering decoder for feed type: {}", feed_type);
        self.factories.insert(feed_type.to_string(), factory);
    }

    pub fn decoder_for(&self, feed_type: &str) -> Result<Box<dyn FeedDecoder>> {
        self.factories
            .get(feed_type)
            .map(|factory| factory())
            .ok_or_else(|| ReaderError::UnknownFeedType(feed_type.to_string()))
    }

    pub fn list_feed_types(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// feed-rs backed decoder. feed-rs sniffs RSS 0.9x/1.0/2.0 and Atom itself,
/// so one type serves both registrations.
pub struct RssDecoder {
    feed_type: &'static str,
}

impl RssDecoder {
    pub fn rss() -> Self {
        Self { feed_type: "rss" }
    }

    pub fn atom() -> Self {
        Self { feed_type: "atom" }
    }

    fn convert_entry(entry: feed_rs::model::Entry) -> Article {
        let title = entry
            .title
            .map(|t| extract_text_from_html(&t.content))
            .unwrap_or_default();

        // Prefer full content over the summary
        let raw_body = entry
            .content
            .and_then(|c| c.body)
            .or_else(|| entry.summary.map(|s| s.content))
            .unwrap_or_default();

        Article {
            title,
            body: extract_text_from_html(&raw_body),
            link: entry.links.first().map(|l| l.href.clone()),
            published_at: entry.published.or(entry.updated),
        }
    }
}

impl FeedDecoder for RssDecoder {
    fn feed_type(&self) -> &str {
        self.feed_type
    }

    fn parse(&self, payload: &str) -> Result<Vec<Article>> {
        debug!("Parsing {} payload ({} bytes)", self.feed_type, payload.len());

        let feed = parser::parse(payload.as_bytes()).map_err(|e| {
            if is_valid_feed_content(payload) {
                ReaderError::Parse(format!("Failed to parse feed: {}", e))
            } else {
                ReaderError::Parse("payload does not look like an RSS or Atom document".to_string())
            }
        })?;

        let articles: Vec<Article> = feed.entries.into_iter().map(Self::convert_entry).collect();

        info!("Parsed feed with {} articles", articles.len());
        Ok(articles)
    }
}

/// Cheap sniff for RSS/Atom markers, used to word parse errors
pub fn is_valid_feed_content(content: &str) -> bool {
    let content_lower = content.to_lowercase();

    content_lower.contains("<rss")
        || content_lower.contains("<feed")
        || content_lower.contains("<rdf:rdf")
        || content_lower.contains("<channel")
}
