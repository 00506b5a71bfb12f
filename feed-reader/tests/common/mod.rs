#![allow(dead_code)]

use async_trait::async_trait;
use feed_reader::{
    Article, DecoderRegistry, FeedDecoder, FeedDriver, Fetch, QuickHeuristic, ReaderError,
    Reporter, Result, ShutdownHandle,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Serves canned payloads by URL and remembers what was asked for
#[derive(Default)]
pub struct StaticFetcher {
    payloads: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: &str, payload: &str) -> Self {
        self.payloads.insert(url.to_string(), payload.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for StaticFetcher {
    async fn get_content(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.payloads
            .get(url)
            .cloned()
            .ok_or_else(|| ReaderError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
    }
}

/// Requests shutdown the first time it is asked for a feed
#[derive(Default)]
pub struct StoppingFetcher {
    pub inner: StaticFetcher,
    pub handle: Mutex<Option<ShutdownHandle>>,
}

#[async_trait]
impl Fetch for StoppingFetcher {
    async fn get_content(&self, url: &str) -> Result<String> {
        let handle = self.handle.lock().unwrap().take();
        if let Some(handle) = handle {
            handle.request().await;
        }
        self.inner.get_content(url).await
    }
}

/// Test payload format: articles separated by a `---` line; the first line of
/// each article is its title and the remaining lines its body.
pub struct LinesDecoder;

impl FeedDecoder for LinesDecoder {
    fn feed_type(&self) -> &str {
        "lines"
    }

    fn parse(&self, payload: &str) -> Result<Vec<Article>> {
        if payload.starts_with("!broken") {
            return Err(ReaderError::Parse("broken payload".to_string()));
        }
        if payload.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(payload
            .split("\n---\n")
            .map(|chunk| match chunk.split_once('\n') {
                Some((title, body)) => Article::new(title, body),
                None => Article::new(chunk, ""),
            })
            .collect())
    }
}

fn lines_factory() -> Box<dyn FeedDecoder> {
    Box::new(LinesDecoder)
}

pub fn test_decoders() -> DecoderRegistry {
    let mut registry = DecoderRegistry::new();
    registry.register("lines", lines_factory);
    registry
}

pub fn test_driver(fetcher: Arc<dyn Fetch>, top_k: usize) -> FeedDriver<Vec<u8>> {
    FeedDriver::new(
        Arc::new(QuickHeuristic::new()),
        fetcher,
        test_decoders(),
        Reporter::new(top_k),
        Vec::new(),
    )
}

pub async fn output_of(driver: &FeedDriver<Vec<u8>>) -> String {
    let sink = driver.sink();
    let bytes = sink.lock().await.clone();
    String::from_utf8(bytes).expect("report output is UTF-8")
}
