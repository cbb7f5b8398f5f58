// 🗃️ Record Store contract
//
// The query engine only ever reads through this trait. Implementations
// decide their own stable page order and never hand out mutable records.

use crate::error::QueryResult;
use crate::predicate::SearchPredicate;
use crate::record::Record;
use std::collections::HashSet;

pub trait RecordStore {
    /// Number of records the predicate accepts
    fn count_matching(&self, predicate: &SearchPredicate) -> QueryResult<u64>;

    /// One window of matching records in store order
    fn fetch_page(
        &self,
        predicate: &SearchPredicate,
        offset: u64,
        limit: u64,
    ) -> QueryResult<Vec<Record>>;

    /// Every matching record, order unspecified
    fn fetch_all_matching(&self, predicate: &SearchPredicate) -> QueryResult<Vec<Record>>;
}

/// Vec-backed store; insertion order is page order
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        MemoryStore { records }
    }

    /// Wipe and reload. Duplicate ids reject the whole load and keep the old contents.
    pub fn replace_all(&mut self, records: Vec<Record>) -> anyhow::Result<usize> {
        ensure_unique_ids(&records)?;
        self.records = records;
        Ok(self.records.len())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching<'a>(
        &'a self,
        predicate: &'a SearchPredicate,
    ) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| predicate.matches(r))
    }
}

impl RecordStore for MemoryStore {
    fn count_matching(&self, predicate: &SearchPredicate) -> QueryResult<u64> {
        Ok(self.matching(predicate).count() as u64)
    }

    fn fetch_page(
        &self,
        predicate: &SearchPredicate,
        offset: u64,
        limit: u64,
    ) -> QueryResult<Vec<Record>> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(self.matching(predicate).skip(skip).take(take).cloned().collect())
    }

    fn fetch_all_matching(&self, predicate: &SearchPredicate) -> QueryResult<Vec<Record>> {
        Ok(self.matching(predicate).cloned().collect())
    }
}

/// Every store refuses a load that repeats a record id
pub fn ensure_unique_ids(records: &[Record]) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    if let Some(dup) = records.iter().find(|r| !seen.insert(r.id.as_str())) {
        anyhow::bail!("Duplicate record id in load: {}", dup.id);
    }
    Ok(())
}
