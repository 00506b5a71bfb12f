use crate::heuristics::HeuristicOptions;
use crate::reporter::DEFAULT_TOP_K;
use crate::subscriptions::DEFAULT_SUBSCRIPTIONS_PATH;
use crate::types::FetchConfig;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Reads subscribed feeds and reports the most frequent named entities per feed.
///
/// `-h` selects the heuristic, so help is only available as `--help`.
#[derive(Debug, Clone, Parser)]
#[command(name = "feed-reader", version, disable_help_flag = true)]
pub struct CliOptions {
    /// Named-entity heuristic; unknown names fall back to `quick`
    #[arg(short = 'h', long = "heuristic", value_name = "NAME")]
    pub heuristic: Option<String>,

    /// Subscription file
    #[arg(
        short = 'c',
        long = "subscriptions",
        value_name = "PATH",
        default_value = DEFAULT_SUBSCRIPTIONS_PATH
    )]
    pub subscriptions: PathBuf,

    /// Entities listed per feed
    #[arg(short = 'k', long = "top", value_name = "K", default_value_t = DEFAULT_TOP_K)]
    pub top: usize,

    /// Feeds processed concurrently
    #[arg(short = 'j', long = "jobs", value_name = "N", default_value_t = 1)]
    pub jobs: usize,

    /// Count capitalized stopwords at sentence start as entities
    #[arg(long = "keep-stopwords")]
    pub keep_stopwords: bool,

    /// HTTP timeout in seconds
    #[arg(long = "timeout", value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// HTTP retries per feed
    #[arg(long = "retries", value_name = "N", default_value_t = 3)]
    pub retries: u32,

    #[arg(long = "user-agent", value_name = "UA", default_value = "FeedReader/2.0")]
    pub user_agent: String,

    /// trace, debug, info, warn or error
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: tracing::Level,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl CliOptions {
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.timeout,
            max_retries: self.retries,
            ..FetchConfig::default()
        }
    }

    pub fn heuristic_options(&self) -> HeuristicOptions {
        HeuristicOptions {
            keep_stopwords: self.keep_stopwords,
        }
    }
}
