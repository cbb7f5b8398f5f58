// Sales Insight - Core Library
// Month-scoped analytics over product-sale records, shared by the CLI and API server

pub mod error;
pub mod month;
pub mod record;
pub mod predicate;
pub mod pagination;
pub mod aggregation;
pub mod store;
pub mod db;
pub mod seed;
pub mod engine;
pub mod config;
pub mod logging;
#[cfg(feature = "server")]
pub mod http;

// Re-export commonly used types
pub use error::{QueryError, QueryResult};
pub use month::{resolve_month, MonthQuery};
pub use record::Record;
pub use predicate::{SearchPredicate, SearchTerm};
pub use pagination::PageRequest;
pub use aggregation::{
    CategoryCounts, Combined, Histogram, PriceBand, Statistics, PRICE_BANDS,
};
pub use store::{MemoryStore, RecordStore};
pub use db::SqliteStore;
pub use engine::{Listing, ListingRequest, SalesAnalytics};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
