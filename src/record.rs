use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One product-sale entry, read-only to the query engine
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Record {
    /// Opaque stable identifier. Upstream dumps use numbers, we keep text.
    #[serde(default = "default_uuid", deserialize_with = "deserialize_id")]
    pub id: String,

    pub title: String,

    pub description: String,

    /// Non-negative; enforced by the loaders
    pub price: f64,

    /// Free-form label, not predeclared anywhere
    pub category: String,

    pub sold: bool,

    /// Only the calendar month (UTC) is ever used for querying
    #[serde(rename = "dateOfSale")]
    pub date_of_sale: DateTime<Utc>,

    #[serde(default)]
    pub image: String,
}

// Helper functions for serde defaults
fn default_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Integer(i64),
    Float(f64),
    Text(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Integer(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

impl Record {
    /// Calendar month of the sale (1..=12), year ignored
    pub fn sale_month(&self) -> u32 {
        self.date_of_sale.month()
    }
}
