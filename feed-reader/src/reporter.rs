use crate::types::{EntityRecord, FeedReport};
use std::cmp::Ordering;
use std::fmt::Write;

pub const DEFAULT_TOP_K: usize = 5;

const SEPARATOR: &str = "===============================================";

/// Ranks a snapshot and renders the per-feed block for the output sink
#[derive(Debug, Clone)]
pub struct Reporter {
    top_k: usize,
}

impl Reporter {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn report(&self, source: &str, snapshot: Vec<EntityRecord>) -> FeedReport {
        FeedReport {
            source: source.to_string(),
            entries: rank(snapshot, self.top_k),
        }
    }

    pub fn render(&self, report: &FeedReport) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", SEPARATOR);
        let _ = writeln!(out, "Feed: {}", report.source);
        let _ = writeln!(out, "{}", SEPARATOR);
        let _ = writeln!(out, "Top {} Named Entities by Frequency:", report.len());
        for entry in &report.entries {
            let _ = writeln!(out, "{} ({}): {}", entry.name, entry.category, entry.frequency);
        }

        out
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

/// Frequency descending, then first-seen ascending; keeps at most `k`.
pub fn rank(mut records: Vec<EntityRecord>, k: usize) -> Vec<EntityRecord> {
    records.sort_by(compare);
    records.truncate(k);
    records
}

fn compare(a: &EntityRecord, b: &EntityRecord) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.first_seen.cmp(&b.first_seen))
}
