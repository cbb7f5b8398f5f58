// 📅 Month Resolver - month name → 1..12 ordinal
//
// One canonical strategy for every endpoint: exact, case-insensitive match
// against the twelve English month names. Year is never part of the query.

use crate::error::{QueryError, QueryResult};
use serde::Serialize;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Calendar month regardless of year. Always in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MonthQuery(u32);

impl MonthQuery {
    /// Build from an ordinal, None when outside 1..=12
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        (1..=12).contains(&ordinal).then_some(MonthQuery(ordinal))
    }

    pub fn ordinal(&self) -> u32 {
        self.0
    }

    /// Lower-case English name ("march")
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.0 - 1) as usize]
    }
}

/// Resolve an optional month name into its ordinal.
///
/// Absent input and anything that is not a month name both fail with
/// `InvalidMonth`; nothing is defaulted.
pub fn resolve_month(input: Option<&str>) -> QueryResult<MonthQuery> {
    let raw = input.ok_or_else(|| QueryError::invalid_month(None))?;
    let normalized = raw.to_lowercase();

    MONTH_NAMES
        .iter()
        .position(|name| *name == normalized)
        .map(|index| MonthQuery(index as u32 + 1))
        .ok_or_else(|| QueryError::invalid_month(Some(raw)))
}
