use super::{CategoryCounts, Histogram, Statistics};
use crate::record::Record;
use serde::Serialize;

/// Statistics, histogram and category counts from one traversal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Combined {
    pub statistics: Statistics,
    pub histogram: Histogram,
    pub category_counts: CategoryCounts,
}

impl Combined {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut combined = Combined::default();
        for record in records {
            combined.statistics.add(record);
            combined.histogram.add(record);
            combined.category_counts.add(record);
        }
        combined
    }
}
