use crate::types::{EntityOccurrence, EntityRecord};
use std::collections::HashMap;

/// Per-feed frequency table keyed by entity name.
///
/// Records live in insertion order; `index` maps a name to its slot. A name
/// keeps the category of its first occurrence even if a later occurrence
/// carries a different one, so "Jordan" the person and "Jordan" the country
/// collapse into one record.
#[derive(Debug, Default)]
pub struct EntityAggregator {
    records: Vec<EntityRecord>,
    index: HashMap<String, usize>,
    occurrences: u64,
}

impl EntityAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, occurrence: EntityOccurrence) {
        self.occurrences += 1;

        if let Some(&slot) = self.index.get(&occurrence.name) {
            self.records[slot].frequency += 1;
            return;
        }

        let slot = self.records.len();
        self.index.insert(occurrence.name.clone(), slot);
        self.records.push(EntityRecord {
            name: occurrence.name,
            category: occurrence.category,
            frequency: 1,
            first_seen: slot,
        });
    }

    pub fn record_all<I>(&mut self, occurrences: I)
    where
        I: IntoIterator<Item = EntityOccurrence>,
    {
        for occurrence in occurrences {
            self.record(occurrence);
        }
    }

    /// Owned copy of the records in first-seen order
    pub fn snapshot(&self) -> Vec<EntityRecord> {
        self.records.clone()
    }

    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.index.get(name).map(|&slot| &self.records[slot])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of occurrences recorded since construction or the last reset
    pub fn total_occurrences(&self) -> u64 {
        self.occurrences
    }

    pub fn reset(&mut self) {
        self.records.clear();
        self.index.clear();
        self.occurrences = 0;
    }
}
