use anyhow::Context;
use clap::Parser;
use feed_reader::{
    CliOptions, DecoderRegistry, FeedDriver, HeuristicRegistry, HttpFetcher, JsonSubscriptionFile,
    Reporter, SubscriptionSource, BANNER,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = CliOptions::parse();

    tracing_subscriber::fmt()
        .with_max_level(options.log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting feed reader");

    let registry = HeuristicRegistry::new();
    if let Some(notice) = registry.fallback_notice(options.heuristic.as_deref()) {
        // Shown whatever the log level
        eprintln!("{}", notice);
    }
    let heuristic = registry.select(options.heuristic.as_deref(), &options.heuristic_options());

    let source = JsonSubscriptionFile::new(&options.subscriptions);
    let subscriptions = source
        .load()
        .with_context(|| format!("Failed to load subscriptions from {}", source.path().display()))?;

    if subscriptions.is_empty() {
        warn!("No subscriptions found in {}", source.path().display());
    }

    let fetcher =
        HttpFetcher::new(options.fetch_config()).context("Failed to create HTTP client")?;

    let driver = FeedDriver::new(
        heuristic,
        Arc::new(fetcher),
        DecoderRegistry::new(),
        Reporter::new(options.top),
        std::io::stdout(),
    )
    .with_jobs(options.jobs);

    let shutdown = driver.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => shutdown.request().await,
            Err(e) => error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    driver
        .emit(&format!("{}\n", BANNER))
        .await
        .context("Failed to write to standard output")?;

    let summary = driver
        .run(subscriptions)
        .await
        .context("Failed to write report to standard output")?;

    info!(
        "Feed reader finished: {} reported, {} failed, {} skipped",
        summary.reported, summary.failed, summary.skipped
    );
    Ok(())
}
