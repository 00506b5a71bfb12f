pub mod quick;

pub use quick::QuickHeuristic;

use crate::traits::Heuristic;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Knobs shared by every heuristic factory
#[derive(Debug, Clone, Default)]
pub struct HeuristicOptions {
    pub keep_stopwords: bool,
}

pub type HeuristicFactory = fn(&HeuristicOptions) -> Arc<dyn Heuristic>;

fn quick_factory(options: &HeuristicOptions) -> Arc<dyn Heuristic> {
    if options.keep_stopwords {
        Arc::new(QuickHeuristic::without_stopwords())
    } else {
        Arc::new(QuickHeuristic::new())
    }
}

/// Heuristic registry mapping a name to a factory
pub struct HeuristicRegistry {
    factories: BTreeMap<String, HeuristicFactory>,
    default_heuristic: String,
}

impl HeuristicRegistry {
    /// Registry holding only the built-in `quick` heuristic, which is also the default
    pub fn new() -> Self {
        let mut registry = Self {
            factories: BTreeMap::new(),
            default_heuristic: QuickHeuristic::NAME.to_string(),
        };
        registry.register(QuickHeuristic::NAME, quick_factory);
        registry
    }

    /// Register a factory; names are matched case-insensitively
    pub fn register(&mut self, name: &str, factory: HeuristicFactory) {
        let name = name.to_lowercase();
        debug!("Registering heuristic: {}", name);
        self.factories.insert(name, factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_lowercase())
    }

    pub fn list_heuristics(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    pub fn default_heuristic(&self) -> &str {
        &self.default_heuristic
    }

    pub fn create(&self, name: &str, options: &HeuristicOptions) -> Option<Arc<dyn Heuristic>> {
        self.factories
            .get(&name.to_lowercase())
            .map(|factory| factory(options))
    }

    /// Resolve the heuristic for this run. A missing or unknown name falls back
    /// to the default.
    pub fn select(
        &self,
        requested: Option<&str>,
        options: &HeuristicOptions,
    ) -> Arc<dyn Heuristic> {
        if let Some(name) = requested {
            if let Some(heuristic) = self.create(name, options) {
                info!("Using heuristic: {}", heuristic.name());
                return heuristic;
            }
            debug!("Falling back to {} for {}", self.default_heuristic, name);
        }

        self.create(&self.default_heuristic, options)
            .unwrap_or_else(|| quick_factory(options))
    }

    /// Message for a requested name that `select` will replace with the default
    pub fn fallback_notice(&self, requested: Option<&str>) -> Option<String> {
        requested.filter(|name| !self.contains(name)).map(|name| {
            format!(
                "Unknown heuristic: {}. Using default ({}).",
                name.to_lowercase(),
                self.default_heuristic
            )
        })
    }
}

impl Default for HeuristicRegistry {
    fn default() -> Self {
        Self::new()
    }
}
