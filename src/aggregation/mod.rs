// Aggregations over one month's record set
//
// Each aggregator is an accumulator: `add` one record at a time, read the
// result at the end. The combined view drives all three from a single loop,
// so its output is identical to running them one by one.

pub mod statistics;
pub mod histogram;
pub mod categories;
pub mod combined;

pub use statistics::Statistics;
pub use histogram::{Histogram, PriceBand, PRICE_BANDS};
pub use categories::CategoryCounts;
pub use combined::Combined;
