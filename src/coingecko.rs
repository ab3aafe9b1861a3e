use crate::config::GeckoConfig;
use crate::error::ApiError;
use crate::models::HealthStatus;
use anyhow::{Context, Result};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::{Map, Value};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const PING_PATH: &str = "/ping";
const COINS_LIST_PATH: &str = "/coins/list";
const SIMPLE_PRICE_PATH: &str = "/simple/price";
const PING_FIELD: &str = "gecko_says";
pub const PING_SENTINEL: &str = "(V3) To the Moon!";
const QUOTE_CURRENCY: &str = "usd";

pub struct CoinGeckoClient<'a> {
    http: &'a Client,
    base_url: String,
    headers: HeaderMap,
}

impl<'a> CoinGeckoClient<'a> {
    pub fn new(http: &'a Client, config: &GeckoConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = config.api_key.as_deref() {
            headers.insert(
                API_KEY_HEADER,
                HeaderValue::from_str(api_key).context("invalid CoinGecko API key")?,
            );
        }

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            headers,
        })
    }

    /// Unauthenticated health check. Never fails; every problem is folded into the status.
    pub async fn ping(&self) -> HealthStatus {
        let url = format!("{}{}", self.base_url, PING_PATH);
        let response = match self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return HealthStatus::Unreachable(format!("GET {} failed: {}", url, err)),
        };

        let status = response.status();
        if !status.is_success() {
            return HealthStatus::UnexpectedResponse(format!("GET {} returned {}", url, status));
        }

        match response.json::<Value>().await {
            Ok(body) => evaluate_ping_body(&body),
            Err(err) => HealthStatus::UnexpectedResponse(format!("invalid ping body: {}", err)),
        }
    }

    /// Full catalog as returned by the API, always a JSON array.
    pub async fn fetch_coins_list(&self) -> Result<Value> {
        let payload = self.get(COINS_LIST_PATH).await?;
        if !payload.is_array() {
            return Err(ApiError::unexpected(COINS_LIST_PATH, "expected a JSON array").into());
        }
        Ok(payload)
    }

    /// Raw `/simple/price` object keyed by asset id, in the order the API sent it.
    pub async fn fetch_simple_prices(&self, ids: &[String]) -> Result<Map<String, Value>> {
        let joined = ids.join(",");
        let query = [
            ("ids", joined.as_str()),
            ("vs_currencies", QUOTE_CURRENCY),
            ("include_last_updated_at", "true"),
        ];
        let payload = self.get_with_query(SIMPLE_PRICE_PATH, &query).await?;
        match payload {
            Value::Object(map) => Ok(map),
            _ => Err(ApiError::unexpected(SIMPLE_PRICE_PATH, "expected a JSON object").into()),
        }
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.get_with_query(path, &[]).await
    }

    async fn get_with_query(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} query={:?}", url, query);
        let response = self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::status(path, status, &body).into());
        }

        response
            .json::<Value>()
            .await
            .with_context(|| format!("failed to parse CoinGecko response from {}", path))
    }
}

pub fn evaluate_ping_body(body: &Value) -> HealthStatus {
    match body.get(PING_FIELD).and_then(Value::as_str) {
        Some(PING_SENTINEL) => HealthStatus::Healthy,
        Some(other) => {
            HealthStatus::UnexpectedResponse(format!("{} was {:?}", PING_FIELD, other))
        }
        None => HealthStatus::UnexpectedResponse(format!("{} missing from ping body", PING_FIELD)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ping_body_requires_exact_sentinel() {
        assert_eq!(
            evaluate_ping_body(&json!({ "gecko_says": "(V3) To the Moon!" })),
            HealthStatus::Healthy
        );
        assert!(!evaluate_ping_body(&json!({ "gecko_says": "(V3) to the moon" })).is_healthy());
        assert!(!evaluate_ping_body(&json!({ "status": "ok" })).is_healthy());
        assert!(!evaluate_ping_body(&json!({ "gecko_says": 1 })).is_healthy());
        assert!(!evaluate_ping_body(&json!(["(V3) To the Moon!"])).is_healthy());
    }

    #[test]
    fn api_key_must_be_a_valid_header() {
        let http = Client::new();
        let config = GeckoConfig {
            api_key: Some("bad\nkey".to_string()),
            ..GeckoConfig::default()
        };
        assert!(CoinGeckoClient::new(&http, &config).is_err());

        let config = GeckoConfig {
            api_key: Some("CG-demo".to_string()),
            ..GeckoConfig::default()
        };
        let client = CoinGeckoClient::new(&http, &config).unwrap();
        assert_eq!(
            client
                .headers
                .get(API_KEY_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("CG-demo")
        );
    }
}
