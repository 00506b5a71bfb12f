use crate::traits::SubscriptionSource;
use crate::types::{ReaderError, Result, Subscription};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_SUBSCRIPTIONS_PATH: &str = "config/subscriptions.json";

/// One entry of the subscription file. `url` may hold a `%s` placeholder that
/// is filled from each of `urlParams` in turn.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionEntry {
    pub url: String,
    #[serde(rename = "urlType")]
    pub url_type: String,
    #[serde(rename = "urlParams", default)]
    pub url_params: Vec<String>,
}

impl SubscriptionEntry {
    pub fn expand(&self) -> Vec<Subscription> {
        if self.url_params.is_empty() {
            return vec![Subscription::new(self.url.clone(), self.url_type.clone())];
        }

        self.url_params
            .iter()
            .map(|param| {
                Subscription::new(self.url.replacen("%s", param, 1), self.url_type.clone())
            })
            .collect()
    }
}

/// Subscriptions stored as a JSON array on disk
pub struct JsonSubscriptionFile {
    path: PathBuf,
}

impl JsonSubscriptionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubscriptionSource for JsonSubscriptionFile {
    fn load(&self) -> Result<Vec<Subscription>> {
        debug!("Reading subscriptions from {}", self.path.display());

        let content = fs::read_to_string(&self.path).map_err(|e| {
            ReaderError::Subscriptions(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        let subscriptions = parse_subscriptions(&content)?;

        info!(
            "Loaded {} subscriptions from {}",
            subscriptions.len(),
            self.path.display()
        );
        Ok(subscriptions)
    }
}

pub fn parse_subscriptions(json: &str) -> Result<Vec<Subscription>> {
    let entries: Vec<SubscriptionEntry> = serde_json::from_str(json)?;
    let mut subscriptions = Vec::new();

    for (position, entry) in entries.iter().enumerate() {
        if entry.url.trim().is_empty() {
            return Err(ReaderError::Subscriptions(format!(
                "entry {} has an empty url",
                position
            )));
        }
        if entry.url_type.trim().is_empty() {
            return Err(ReaderError::Subscriptions(format!(
                "entry {} ({}) has an empty urlType",
                position, entry.url
            )));
        }
        subscriptions.extend(entry.expand());
    }

    Ok(subscriptions)
}
