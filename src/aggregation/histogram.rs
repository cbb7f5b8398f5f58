// 📊 Price Histogram - ten fixed bands, upper edge inclusive
//
// Bands are checked in order and the first one whose upper bound is >= price
// wins. The last band has no upper bound, so every price lands somewhere.

use crate::record::Record;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub label: &'static str,
    /// Inclusive upper bound, None for the open-ended last band
    pub upper: Option<f64>,
}

pub const PRICE_BANDS: [PriceBand; 10] = [
    PriceBand { label: "0-100", upper: Some(100.0) },
    PriceBand { label: "101-200", upper: Some(200.0) },
    PriceBand { label: "201-300", upper: Some(300.0) },
    PriceBand { label: "301-400", upper: Some(400.0) },
    PriceBand { label: "401-500", upper: Some(500.0) },
    PriceBand { label: "501-600", upper: Some(600.0) },
    PriceBand { label: "601-700", upper: Some(700.0) },
    PriceBand { label: "701-800", upper: Some(800.0) },
    PriceBand { label: "801-900", upper: Some(900.0) },
    PriceBand { label: "901-above", upper: None },
];

/// Index into PRICE_BANDS for a price
pub fn band_index(price: f64) -> usize {
    PRICE_BANDS
        .iter()
        .position(|band| band.upper.map_or(true, |upper| price <= upper))
        .unwrap_or(PRICE_BANDS.len() - 1)
}

/// Counts per band, always all ten bands in band order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; 10],
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: &Record) {
        self.counts[band_index(record.price)] += 1;
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut histogram = Histogram::new();
        for record in records {
            histogram.add(record);
        }
        histogram
    }

    /// Count for a band label, None for an unknown label
    pub fn get(&self, label: &str) -> Option<u64> {
        PRICE_BANDS
            .iter()
            .position(|band| band.label == label)
            .map(|index| self.counts[index])
    }

    /// (label, count) pairs in band order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        PRICE_BANDS
            .iter()
            .zip(self.counts.iter())
            .map(|(band, count)| (band.label, *count))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Serialize for Histogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PRICE_BANDS.len()))?;
        for (label, count) in self.iter() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}
