use crate::models::{AssetId, PriceObservation, PriceReport, PriceRow, SimplePriceQuote};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_local_timestamp(epoch_seconds: i64) -> Result<String> {
    let utc = DateTime::from_timestamp(epoch_seconds, 0)
        .ok_or_else(|| anyhow!("last_updated_at {} is out of range", epoch_seconds))?;
    Ok(utc.with_timezone(&Local).format(DATE_FORMAT).to_string())
}

/// One observation per key in the payload, in payload order.
pub fn observations_from_payload(payload: Map<String, Value>) -> Result<Vec<PriceObservation>> {
    payload
        .into_iter()
        .map(|(name, value)| {
            let quote: SimplePriceQuote = serde_json::from_value(value)
                .with_context(|| format!("malformed price entry for {}", name))?;
            let date = format_local_timestamp(quote.last_updated_at)
                .with_context(|| format!("invalid timestamp for {}", name))?;
            Ok(PriceObservation {
                name,
                usd: quote.usd,
                date,
            })
        })
        .collect()
}

pub fn missing_ids(requested: &[AssetId], observations: &[PriceObservation]) -> Vec<AssetId> {
    let returned: HashSet<&str> = observations.iter().map(|o| o.name.as_str()).collect();
    let mut seen = HashSet::new();
    let mut missing = Vec::new();
    for id in requested {
        if !returned.contains(id.as_str()) && seen.insert(id.as_str()) {
            missing.push(id.clone());
        }
    }
    missing
}

pub fn build_report(requested: &[AssetId], payload: Map<String, Value>) -> Result<PriceReport> {
    let observations = observations_from_payload(payload)?;
    let missing = missing_ids(requested, &observations);
    let table = observations.into_iter().map(PriceRow::from).collect();
    Ok(PriceReport { table, missing })
}
