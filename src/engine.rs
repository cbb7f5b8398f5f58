// ⚙️ Sales Analytics - the five query operations over a RecordStore
//
// Month resolution always runs first, so an invalid month never reaches the
// store. Aggregations fetch the month's records once and reduce them.

use crate::aggregation::{CategoryCounts, Combined, Histogram, Statistics};
use crate::error::QueryResult;
use crate::month::{resolve_month, MonthQuery};
use crate::pagination::PageRequest;
use crate::predicate::SearchPredicate;
use crate::record::Record;
use crate::store::RecordStore;
use serde::Serialize;

/// Raw listing input, straight from the boundary layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingRequest {
    pub month: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListingRequest {
    /// Build from raw query-string pairs.
    ///
    /// Repeated keys keep their first value; `pageSize` and `perPage` fill the
    /// same slot. Unknown keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut request = ListingRequest::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "month" => &mut request.month,
                "search" => &mut request.search,
                "page" => &mut request.page,
                "pageSize" | "perPage" => &mut request.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.clone());
            }
        }

        request
    }
}

/// One page of matching records plus paging metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub records: Vec<Record>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

pub struct SalesAnalytics<'a, S: RecordStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> SalesAnalytics<'a, S> {
    pub fn new(store: &'a S) -> Self {
        SalesAnalytics { store }
    }

    /// Searchable, paginated listing for one month
    pub fn list(&self, request: &ListingRequest) -> QueryResult<Listing> {
        let month = resolve_month(request.month.as_deref())?;
        let predicate = SearchPredicate::with_search(month, request.search.as_deref());
        let paging = PageRequest::from_raw(request.page.as_deref(), request.page_size.as_deref());

        let records = self
            .store
            .fetch_page(&predicate, paging.offset(), paging.limit())?;
        let total = self.store.count_matching(&predicate)?;

        tracing::debug!(
            month = month.name(),
            search = ?request.search,
            page = paging.page,
            total,
            "listing served"
        );

        Ok(Listing {
            records,
            total,
            page: paging.page,
            page_size: paging.page_size,
            total_pages: paging.total_pages(total),
        })
    }

    pub fn statistics(&self, month: Option<&str>) -> QueryResult<Statistics> {
        let records = self.month_records(month)?;
        Ok(Statistics::from_records(&records))
    }

    pub fn histogram(&self, month: Option<&str>) -> QueryResult<Histogram> {
        let records = self.month_records(month)?;
        Ok(Histogram::from_records(&records))
    }

    pub fn categories(&self, month: Option<&str>) -> QueryResult<CategoryCounts> {
        let records = self.month_records(month)?;
        Ok(CategoryCounts::from_records(&records))
    }

    /// All three aggregations from a single fetch and a single pass
    pub fn combined(&self, month: Option<&str>) -> QueryResult<Combined> {
        let records = self.month_records(month)?;
        Ok(Combined::from_records(&records))
    }

    fn month_records(&self, month: Option<&str>) -> QueryResult<Vec<Record>> {
        let month: MonthQuery = resolve_month(month)?;
        let records = self
            .store
            .fetch_all_matching(&SearchPredicate::for_month(month))?;

        tracing::debug!(month = month.name(), count = records.len(), "month records fetched");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;

    fn record(id: u32, title: &str, price: f64, category: &str, sold: bool, month: u32) -> Record {
        Record {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{} description", title),
            price,
            category: category.to_string(),
            sold,
            date_of_sale: Utc.with_ymd_and_hms(2021, month, 10, 12, 0, 0).unwrap(),
            image: String::new(),
        }
    }

    /// The twelve March records from the worked example plus noise in April
    fn march_store() -> MemoryStore {
        let sold = [50.0, 150.0, 250.0, 999.0, 50.0, 600.0, 720.0];
        let unsold = [10.0, 120.0, 330.0, 480.0, 875.0];

        let mut records = Vec::new();
        for (i, price) in sold.iter().enumerate() {
            records.push(record(i as u32 + 1, "Sold thing", *price, "electronics", true, 3));
        }
        for (i, price) in unsold.iter().enumerate() {
            records.push(record(i as u32 + 10, "Shelf thing", *price, "jewelery", false, 3));
        }
        records.push(record(99, "April thing", 5000.0, "electronics", true, 4));

        MemoryStore::from_records(records)
    }

    #[test]
    fn test_statistics_example() {
        let store = march_store();
        let stats = SalesAnalytics::new(&store).statistics(Some("March")).unwrap();

        assert_eq!(stats.total_revenue, 2819.0);
        assert_eq!(stats.sold_count, 7);
        assert_eq!(stats.unsold_count, 5);
    }

    #[test]
    fn test_histogram_example() {
        let store = march_store();
        let histogram = SalesAnalytics::new(&store).histogram(Some("march")).unwrap();

        assert_eq!(histogram.get("0-100"), Some(3));
        assert_eq!(histogram.get("901-above"), Some(1));
        assert_eq!(histogram.total(), 12);
    }

    #[test]
    fn test_categories_and_combined_agree() {
        let store = march_store();
        let analytics = SalesAnalytics::new(&store);

        let categories = analytics.categories(Some("MARCH")).unwrap();
        assert_eq!(categories.get("electronics"), Some(7));
        assert_eq!(categories.get("jewelery"), Some(5));

        let combined = analytics.combined(Some("March")).unwrap();
        assert_eq!(combined.category_counts, categories);
        assert_eq!(combined.statistics, analytics.statistics(Some("March")).unwrap());
        assert_eq!(combined.histogram, analytics.histogram(Some("March")).unwrap());
    }

    #[test]
    fn test_empty_month_yields_zero_values() {
        let store = march_store();
        let combined = SalesAnalytics::new(&store).combined(Some("December")).unwrap();

        assert_eq!(combined, Combined::default());
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_request_from_pairs_keeps_first_value() {
        let request = ListingRequest::from_pairs(&pairs(&[
            ("month", "March"),
            ("page", "1"),
            ("page", "2"),
            ("pageSize", "5"),
            ("perPage", "10"),
            ("month", "April"),
            ("sort", "price"),
        ]));

        assert_eq!(
            request,
            ListingRequest {
                month: Some("March".to_string()),
                search: None,
                page: Some("1".to_string()),
                page_size: Some("5".to_string()),
            }
        );
    }

    #[test]
    fn test_request_from_pairs_accepts_per_page_alias() {
        let request = ListingRequest::from_pairs(&pairs(&[("perPage", "25"), ("pageSize", "50")]));
        assert_eq!(request.page_size.as_deref(), Some("25"));
        assert!(request.month.is_none());
    }

    #[test]
    fn test_listing_pages_and_totals() {
        let store = march_store();
        let analytics = SalesAnalytics::new(&store);

        let listing = analytics
            .list(&ListingRequest {
                month: Some("March".to_string()),
                page: Some("2".to_string()),
                page_size: Some("5".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(listing.total, 12);
        assert_eq!(listing.page, 2);
        assert_eq!(listing.page_size, 5);
        assert_eq!(listing.total_pages, 3);
        assert_eq!(listing.records.len(), 5);
        assert_eq!(listing.records[0].id, "6");
    }

    #[test]
    fn test_listing_search_and_clamping() {
        let store = march_store();
        let listing = SalesAnalytics::new(&store)
            .list(&ListingRequest {
                month: Some("march".to_string()),
                search: Some("shelf".to_string()),
                page: Some("0".to_string()),
                page_size: Some("500".to_string()),
            })
            .unwrap();

        assert_eq!(listing.page, 1);
        assert_eq!(listing.page_size, 100);
        assert_eq!(listing.total, 5);
        assert_eq!(listing.total_pages, 1);
    }

    #[test]
    fn test_listing_numeric_search() {
        let store = march_store();
        let listing = SalesAnalytics::new(&store)
            .list(&ListingRequest {
                month: Some("March".to_string()),
                search: Some("999".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(listing.total, 1);
        assert_eq!(listing.records[0].price, 999.0);
    }

    #[test]
    fn test_listing_with_no_matches_has_zero_pages() {
        let store = march_store();
        let listing = SalesAnalytics::new(&store)
            .list(&ListingRequest {
                month: Some("March".to_string()),
                search: Some("nothing like this".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(listing.total, 0);
        assert_eq!(listing.total_pages, 0);
        assert!(listing.records.is_empty());
    }

    /// Store that counts calls and can be told to fail
    struct CountingStore {
        calls: Cell<u32>,
        fail: bool,
    }

    impl RecordStore for CountingStore {
        fn count_matching(&self, _: &SearchPredicate) -> QueryResult<u64> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(QueryError::StoreUnavailable("down".to_string()));
            }
            Ok(0)
        }

        fn fetch_page(&self, p: &SearchPredicate, _: u64, _: u64) -> QueryResult<Vec<Record>> {
            self.fetch_all_matching(p)
        }

        fn fetch_all_matching(&self, _: &SearchPredicate) -> QueryResult<Vec<Record>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(QueryError::StoreUnavailable("down".to_string()));
            }
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_invalid_month_never_touches_the_store() {
        let store = CountingStore { calls: Cell::new(0), fail: false };
        let analytics = SalesAnalytics::new(&store);

        assert!(matches!(analytics.statistics(Some("Smarch")), Err(QueryError::InvalidMonth { .. })));
        assert!(matches!(analytics.combined(None), Err(QueryError::InvalidMonth { input: None })));
        assert!(analytics.list(&ListingRequest::default()).is_err());
        assert_eq!(store.calls.get(), 0);
    }

    #[test]
    fn test_combined_fetches_once() {
        let store = CountingStore { calls: Cell::new(0), fail: false };
        SalesAnalytics::new(&store).combined(Some("May")).unwrap();

        assert_eq!(store.calls.get(), 1);
    }

    #[test]
    fn test_store_failures_propagate() {
        let store = CountingStore { calls: Cell::new(0), fail: true };
        let err = SalesAnalytics::new(&store).histogram(Some("May")).unwrap_err();

        assert_eq!(err, QueryError::StoreUnavailable("down".to_string()));
        assert!(!err.is_client_error());
    }
}
