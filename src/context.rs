use crate::coingecko::CoinGeckoClient;
use crate::config::GeckoConfig;
use crate::models::HealthStatus;
use anyhow::{Context, Result};
use log::{info, warn};
use reqwest::Client;
use std::path::Path;

pub struct AppContext {
    config: GeckoConfig,
    http: Client,
}

impl AppContext {
    pub fn initialize(config: GeckoConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;
        if config.api_key.is_none() {
            warn!("API_KEY is not set; CoinGecko requests will be sent without a key");
        }
        Ok(Self { config, http })
    }

    pub fn catalog_path(&self) -> &Path {
        &self.config.catalog_path
    }

    pub fn coingecko(&self) -> Result<CoinGeckoClient<'_>> {
        CoinGeckoClient::new(&self.http, &self.config)
    }

    pub async fn check_connectivity(&self) -> Result<HealthStatus> {
        let status = self.coingecko()?.ping().await;
        match &status {
            HealthStatus::Healthy => info!("CoinGecko API at {} is reachable", self.config.base_url),
            HealthStatus::Unreachable(reason) => {
                warn!("CoinGecko API unreachable: {}", reason)
            }
            HealthStatus::UnexpectedResponse(reason) => {
                warn!("CoinGecko API gave an unexpected ping response: {}", reason)
            }
        }
        Ok(status)
    }
}
