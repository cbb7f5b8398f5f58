// 🔍 Search Predicate - month filter + optional free-text / price match
//
// A record matches when its sale month equals the requested month AND,
// if a term is given, the term is found in title or description
// (case-insensitive), or the term is a number equal to the price.

use crate::month::MonthQuery;
use crate::record::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPredicate {
    month: MonthQuery,
    term: Option<SearchTerm>,
}

/// A non-empty search term with its numeric reading decided up front
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    text: String,
    folded: String,
    price: Option<f64>,
}

impl SearchTerm {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Price to compare against, only when the whole term is a finite number
    pub fn price(&self) -> Option<f64> {
        self.price
    }
}

impl SearchPredicate {
    /// Month-only predicate (what the aggregation endpoints use)
    pub fn for_month(month: MonthQuery) -> Self {
        SearchPredicate { month, term: None }
    }

    /// Month predicate narrowed by a search term. Empty terms add nothing.
    pub fn with_search(month: MonthQuery, term: Option<&str>) -> Self {
        let term = term.filter(|t| !t.is_empty()).map(|t| SearchTerm {
            text: t.to_string(),
            folded: t.to_lowercase(),
            price: parse_price(t),
        });

        SearchPredicate { month, term }
    }

    pub fn month(&self) -> MonthQuery {
        self.month
    }

    pub fn term(&self) -> Option<&SearchTerm> {
        self.term.as_ref()
    }

    /// Evaluate against one record
    pub fn matches(&self, record: &Record) -> bool {
        if record.sale_month() != self.month.ordinal() {
            return false;
        }

        match &self.term {
            None => true,
            Some(term) => {
                contains_folded(&record.title, &term.folded)
                    || contains_folded(&record.description, &term.folded)
                    || term.price.is_some_and(|price| record.price == price)
            }
        }
    }
}

/// Explicit "is this a number" check. NaN and infinities never count.
pub fn parse_price(term: &str) -> Option<f64> {
    term.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Case-insensitive substring test. Shared with the SQLite store.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    contains_folded(haystack, &needle.to_lowercase())
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}
