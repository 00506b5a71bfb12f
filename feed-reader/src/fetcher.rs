use crate::traits::Fetch;
use crate::types::{FetchConfig, ReaderError, Result};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// HTTP fetcher with retries, per-host politeness and a payload size cap
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
    rate_limiter: Arc<RwLock<HashMap<String, Instant>>>,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self {
            client,
            config,
            rate_limiter: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    fn new_backoff(&self) -> ExponentialBackoff<backoff::SystemClock> {
        let initial = Duration::from_secs(self.config.retry_delay_seconds);
        ExponentialBackoff {
            current_interval: initial,
            initial_interval: initial,
            max_interval: initial * 32,
            multiplier: 2.0,
            max_elapsed_time: Some(initial * 60),
            ..Default::default()
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ReaderError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let limit = self.config.max_feed_size_mb * 1024 * 1024;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > limit {
                return Err(ReaderError::FeedTooLarge {
                    size_mb: content_length as usize / (1024 * 1024),
                });
            }
        }

        let content = response.text().await?;
        if content.len() > limit {
            return Err(ReaderError::FeedTooLarge {
                size_mb: content.len() / (1024 * 1024),
            });
        }

        Ok(content)
    }

    async fn apply_rate_limit(&self, host: &str) {
        let min_interval = Duration::from_millis(self.config.min_host_interval_ms);

        let wait = {
            let mut rate_limiter = self.rate_limiter.write().await;
            let now = Instant::now();
            let slot = rate_limiter
                .get(host)
                .map(|last| *last + min_interval)
                .filter(|slot| *slot > now)
                .unwrap_or(now);
            rate_limiter.insert(host.to_string(), slot);
            slot.saturating_duration_since(now)
        };

        if !wait.is_zero() {
            debug!("Rate limiting {}: waiting {:?}", host, wait);
            tokio::time::sleep(wait).await;
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get_content(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ReaderError::General(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }
        let host = parsed.host_str().unwrap_or("").to_string();

        let mut backoff = self.new_backoff();
        let mut attempt = 0;

        loop {
            self.apply_rate_limit(&host).await;
            let start = Instant::now();

            let error = match self.fetch_once(url).await {
                Ok(content) => {
                    info!(
                        "Fetched {} ({} bytes in {}ms)",
                        url,
                        content.len(),
                        start.elapsed().as_millis()
                    );
                    return Ok(content);
                }
                Err(e) => e,
            };

            if attempt >= self.config.max_retries || !is_retryable(&error) {
                return Err(error);
            }

            match backoff.next_backoff() {
                Some(delay) => {
                    debug!(
                        "Attempt {} failed for {}: {}; retrying in {:?}",
                        attempt + 1,
                        url,
                        error,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => return Err(error),
            }
        }
    }
}

fn is_retryable(error: &ReaderError) -> bool {
    match error {
        ReaderError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        ReaderError::HttpStatus { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS.as_u16()
                || StatusCode::from_u16(*status)
                    .map(|s| s.is_server_error())
                    .unwrap_or(false)
        }
        _ => false,
    }
}
