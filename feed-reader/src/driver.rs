use crate::aggregator::EntityAggregator;
use crate::parser::DecoderRegistry;
use crate::reporter::Reporter;
use crate::traits::{Fetch, Heuristic};
use crate::types::{Article, FeedReport, Result, RunSummary, Subscription};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

/// What happened to a single subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    Reported,
    Failed,
    Skipped,
}

/// Cloneable handle used to stop a run between feeds
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    is_running: Arc<RwLock<bool>>,
}

impl ShutdownHandle {
    pub async fn request(&self) {
        let mut is_running = self.is_running.write().await;
        if *is_running {
            info!("Shutdown requested; no further feeds will be started");
        }
        *is_running = false;
    }

    pub async fn is_requested(&self) -> bool {
        !*self.is_running.read().await
    }
}

/// Runs every subscription through fetch, decode, extraction, aggregation and
/// reporting. Each feed gets its own aggregator; reports are written to the
/// sink whole, one feed at a time.
pub struct FeedDriver<W> {
    heuristic: Arc<dyn Heuristic>,
    fetcher: Arc<dyn Fetch>,
    decoders: Arc<DecoderRegistry>,
    reporter: Reporter,
    sink: Arc<Mutex<W>>,
    is_running: Arc<RwLock<bool>>,
    jobs: usize,
}

impl<W: Write + Send> FeedDriver<W> {
    pub fn new(
        heuristic: Arc<dyn Heuristic>,
        fetcher: Arc<dyn Fetch>,
        decoders: DecoderRegistry,
        reporter: Reporter,
        sink: W,
    ) -> Self {
        Self {
            heuristic,
            fetcher,
            decoders: Arc::new(decoders),
            reporter,
            sink: Arc::new(Mutex::new(sink)),
            is_running: Arc::new(RwLock::new(true)),
            jobs: 1,
        }
    }

    /// Number of feeds processed concurrently; 1 keeps subscription order
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn sink(&self) -> Arc<Mutex<W>> {
        self.sink.clone()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            is_running: self.is_running.clone(),
        }
    }

    pub async fn run(&self, subscriptions: Vec<Subscription>) -> Result<RunSummary> {
        info!(
            "Processing {} subscriptions with heuristic {} (top {}, {} at a time)",
            subscriptions.len(),
            self.heuristic.name(),
            self.reporter.top_k(),
            self.jobs
        );

        let outcomes: Vec<FeedOutcome> = stream::iter(subscriptions)
            .map(move |subscription| async move { self.process_subscription(&subscription).await })
            .buffer_unordered(self.jobs)
            .try_collect()
            .await?;

        let mut summary = RunSummary::default();
        for outcome in outcomes {
            match outcome {
                FeedOutcome::Reported => summary.reported += 1,
                FeedOutcome::Failed => summary.failed += 1,
                FeedOutcome::Skipped => summary.skipped += 1,
            }
        }

        info!(
            "Run finished: {} reported, {} failed, {} skipped",
            summary.reported, summary.failed, summary.skipped
        );
        Ok(summary)
    }

    /// Per-subscription failures are logged and turned into `Failed`; only a
    /// sink failure is returned as an error.
    pub async fn process_subscription(&self, subscription: &Subscription) -> Result<FeedOutcome> {
        if !*self.is_running.read().await {
            info!("Skipping {}: shutdown requested", subscription.url);
            return Ok(FeedOutcome::Skipped);
        }

        let articles = match self.load_articles(subscription).await {
            Ok(articles) => articles,
            Err(e) => {
                error!("Failed to process feed {}: {}", subscription.url, e);
                return Ok(FeedOutcome::Failed);
            }
        };

        let report = self.process_articles(&subscription.url, &articles);
        self.emit_report(&report).await?;

        Ok(FeedOutcome::Reported)
    }

    async fn load_articles(&self, subscription: &Subscription) -> Result<Vec<Article>> {
        let decoder = self.decoders.decoder_for(&subscription.feed_type)?;
        let payload = self.fetcher.get_content(&subscription.url).await?;
        decoder.parse(&payload)
    }

    /// Aggregate the articles of one feed, in order, into a fresh table and rank it
    pub fn process_articles(&self, source: &str, articles: &[Article]) -> FeedReport {
        let mut aggregator = EntityAggregator::new();

        for article in articles {
            let text = article.scan_text();
            aggregator.record_all(self.heuristic.extract(&text));
        }

        debug!(
            "Feed {}: {} articles, {} occurrences, {} distinct entities",
            source,
            articles.len(),
            aggregator.total_occurrences(),
            aggregator.len()
        );

        self.reporter.report(source, aggregator.snapshot())
    }

    pub async fn emit_report(&self, report: &FeedReport) -> Result<()> {
        let rendered = self.reporter.render(report);
        self.emit(&rendered).await
    }

    /// Write a block to the sink while holding its lock
    pub async fn emit(&self, text: &str) -> Result<()> {
        let mut sink = self.sink.lock().await;
        sink.write_all(text.as_bytes())?;
        sink.flush()?;
        Ok(())
    }
}
