// 🌱 Seed Loading - bulk data for the record store
//
// Accepts the upstream product_transaction.json dump (or a CSV with the same
// columns) and enforces the price >= 0 invariant before anything is stored.

use crate::record::Record;
use anyhow::{Context, Result};
use std::path::Path;

/// Upstream dump used when no seed URL is configured
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Parse a JSON array of records
pub fn parse_json(content: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> =
        serde_json::from_str(content).context("Failed to parse records JSON")?;
    validate(records)
}

pub fn load_json(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {:?}", path))?;
    parse_json(&content)
}

pub fn load_csv(csv_path: &Path) -> Result<Vec<Record>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: Record = result.context("Failed to deserialize record")?;
        records.push(record);
    }

    validate(records)
}

/// Pick the loader from the file extension (csv, anything else is JSON)
pub fn load_file(path: &Path) -> Result<Vec<Record>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let records = if is_csv { load_csv(path)? } else { load_json(path)? };
    tracing::info!(count = records.len(), path = %path.display(), "seed file loaded");
    Ok(records)
}

/// Download and parse the upstream dump
#[cfg(feature = "server")]
pub async fn fetch_remote(url: &str) -> Result<Vec<Record>> {
    tracing::info!(url, "fetching seed data");

    let body = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to fetch seed data from {}", url))?
        .error_for_status()
        .context("Seed source returned an error status")?
        .text()
        .await
        .context("Failed to read seed response body")?;

    parse_json(&body)
}

fn validate(records: Vec<Record>) -> Result<Vec<Record>> {
    if let Some(bad) = records.iter().find(|r| !(r.price >= 0.0)) {
        anyhow::bail!("Record {} has invalid price {}", bad.id, bad.price);
    }
    Ok(records)
}
