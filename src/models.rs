use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Opaque CoinGecko asset id such as `bitcoin`. Never normalized locally.
pub type AssetId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: AssetId,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
}

/// One `/simple/price` entry as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct SimplePriceQuote {
    pub usd: Number,
    pub last_updated_at: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceObservation {
    pub name: AssetId,
    /// Copied from the payload so integers stay integers in the CSV.
    pub usd: Number,
    /// Local time, `%Y-%m-%d %H:%M:%S`.
    pub date: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceRow {
    pub name: AssetId,
    pub price: Number,
    pub date: String,
}

impl From<PriceObservation> for PriceRow {
    fn from(observation: PriceObservation) -> Self {
        Self {
            name: observation.name,
            price: observation.usd,
            date: observation.date,
        }
    }
}

pub type PriceTable = Vec<PriceRow>;

#[derive(Debug, Clone, Default)]
pub struct PriceReport {
    pub table: PriceTable,
    /// Requested ids the API did not return, in request order.
    pub missing: Vec<AssetId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unreachable(String),
    UnexpectedResponse(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}
