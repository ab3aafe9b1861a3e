use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_CATALOG_FILE: &str = "data/list_of_coins.json";
pub const DEFAULT_PRICE_FILE: &str = "data/crypto_data.csv";

const API_KEY_SETTING: &str = "API_KEY";
const BASE_URL_SETTING: &str = "COINGECKO_BASE_URL";
const TIMEOUT_SETTING: &str = "COINGECKO_TIMEOUT_SECS";

/// Everything the API client and commands need, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GeckoConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
    pub catalog_path: PathBuf,
}

impl Default for GeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
        }
    }
}

impl GeckoConfig {
    pub fn from_env() -> Result<Self> {
        let settings: HashMap<String, String> = [API_KEY_SETTING, BASE_URL_SETTING, TIMEOUT_SETTING]
            .into_iter()
            .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
            .collect();
        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self> {
        let base_url = optional_setting(settings, BASE_URL_SETTING)
            .map(normalize_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = optional_setting(settings, API_KEY_SETTING).map(str::to_string);
        let timeout = optional_setting_secs(settings, TIMEOUT_SETTING)?;

        Ok(Self {
            base_url,
            api_key,
            timeout,
            ..Self::default()
        })
    }

    pub fn with_catalog_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.catalog_path = path;
        }
        self
    }
}

fn normalize_base_url(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

fn optional_setting<'a>(settings: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    settings
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

fn optional_setting_secs(
    settings: &HashMap<String, String>,
    key: &str,
) -> Result<Option<Duration>> {
    let Some(raw) = optional_setting(settings, key) else {
        return Ok(None);
    };
    let value = raw
        .parse::<u64>()
        .map_err(|_| anyhow!("Setting {} must be a whole number of seconds (value: {})", key, raw))?;
    if value == 0 {
        return Err(anyhow!("Setting {} must be > 0 (value: {})", key, raw));
    }
    Ok(Some(Duration::from_secs(value)))
}
