pub mod types;
pub mod traits;
pub mod heuristics;
pub mod aggregator;
pub mod reporter;
pub mod driver;
pub mod fetcher;
pub mod parser;
pub mod subscriptions;
pub mod text;
pub mod cli;

pub use types::*;
pub use traits::{FeedDecoder, Fetch, Heuristic, Occurrences, SubscriptionSource};
pub use heuristics::{HeuristicOptions, HeuristicRegistry, QuickHeuristic};
pub use aggregator::EntityAggregator;
pub use reporter::Reporter;
pub use driver::{FeedDriver, FeedOutcome, ShutdownHandle};
pub use fetcher::HttpFetcher;
pub use parser::{DecoderRegistry, RssDecoder};
pub use subscriptions::JsonSubscriptionFile;
pub use cli::CliOptions;

pub const BANNER: &str = "************* FeedReader version 2.0 *************";
