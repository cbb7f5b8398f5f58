use crate::record::Record;
use serde::Serialize;

/// Revenue of sold items plus the sold/unsold split
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_revenue: f64,
    pub sold_count: u64,
    pub unsold_count: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: &Record) {
        if record.sold {
            self.total_revenue += record.price;
            self.sold_count += 1;
        } else {
            self.unsold_count += 1;
        }
    }

    /// Single pass over the set; zero-valued for empty input
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut stats = Statistics::new();
        for record in records {
            stats.add(record);
        }
        stats
    }

    pub fn record_count(&self) -> u64 {
        self.sold_count + self.unsold_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sale(price: f64, sold: bool) -> Record {
        Record {
            id: format!("{}-{}", price, sold),
            title: "item".to_string(),
            description: String::new(),
            price,
            category: "misc".to_string(),
            sold,
            date_of_sale: Utc.with_ymd_and_hms(2021, 3, 2, 9, 0, 0).unwrap(),
            image: String::new(),
        }
    }

    #[test]
    fn test_empty_input_is_zero() {
        let stats = Statistics::from_records(&Vec::<Record>::new());
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.total_revenue, 0.0);
    }

    #[test]
    fn test_march_example() {
        let mut records: Vec<Record> = [50.0, 150.0, 250.0, 999.0, 50.0, 600.0, 720.0]
            .iter()
            .map(|p| sale(*p, true))
            .collect();
        records.extend([10.0, 120.0, 330.0, 480.0, 875.0].iter().map(|p| sale(*p, false)));

        let stats = Statistics::from_records(&records);

        assert_eq!(stats.total_revenue, 2819.0);
        assert_eq!(stats.sold_count, 7);
        assert_eq!(stats.unsold_count, 5);
        assert_eq!(stats.record_count(), 12);
    }

    #[test]
    fn test_unsold_prices_never_count_as_revenue() {
        let records = vec![sale(500.0, false), sale(20.0, true)];
        let stats = Statistics::from_records(&records);

        assert_eq!(stats.total_revenue, 20.0);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(Statistics::default()).unwrap();
        assert!(value.get("totalRevenue").is_some());
        assert!(value.get("soldCount").is_some());
        assert!(value.get("unsoldCount").is_some());
    }
}
