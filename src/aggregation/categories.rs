use crate::record::Record;
use serde::Serialize;
use std::collections::HashMap;

/// Occurrences per category label, exactly as stored.
///
/// The key set is whatever shows up in the data; unseen categories are absent
/// and there is no ordering contract on the labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts {
    counts: HashMap<String, u64>,
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: &Record) {
        *self.counts.entry(record.category.clone()).or_insert(0) += 1;
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut categories = CategoryCounts::new();
        for record in records {
            categories.add(record);
        }
        categories
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.counts.get(category).copied()
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }
}
