// ⚠️ Query Errors - what the engine reports back to its callers
//
// Only two conditions ever leave the core:
// - InvalidMonth: the caller asked for something that is not a month (client error)
// - StoreUnavailable: the record store failed underneath us (server error)
//
// Bad search terms and bad paging input are normalized, never rejected.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Month parameter missing or not one of the twelve English month names
    #[error("{}", invalid_month_message(.input))]
    InvalidMonth { input: Option<String> },

    /// Propagated from the record store, never recovered by the core
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
}

fn invalid_month_message(input: &Option<String>) -> String {
    match input {
        None => "Month parameter is required. Please provide a month between January and December"
            .to_string(),
        Some(raw) => format!(
            "Invalid month '{}'. Please provide a month between January and December",
            raw
        ),
    }
}

impl QueryError {
    pub fn invalid_month(input: Option<&str>) -> Self {
        QueryError::InvalidMonth {
            input: input.map(str::to_string),
        }
    }

    /// True when the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, QueryError::InvalidMonth { .. })
    }
}

impl From<rusqlite::Error> for QueryError {
    fn from(err: rusqlite::Error) -> Self {
        QueryError::StoreUnavailable(err.to_string())
    }
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;
