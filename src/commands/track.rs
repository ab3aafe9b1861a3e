use crate::context::AppContext;
use crate::export::write_price_table;
use crate::models::{AssetId, PriceReport};
use crate::prices::build_report;
use anyhow::Result;
use log::{info, warn};
use std::path::Path;

pub async fn run(app: &AppContext, coins: &[AssetId], output_path: &Path) -> Result<PriceReport> {
    info!("Fetching USD prices for {} coin(s): {}", coins.len(), coins.join(", "));

    let payload = app.coingecko()?.fetch_simple_prices(coins).await?;
    let report = build_report(coins, payload)?;
    if !report.missing.is_empty() {
        warn!(
            "CoinGecko returned no price for: {}",
            report.missing.join(", ")
        );
    }

    write_price_table(output_path, &report.table)?;
    info!(
        "Price table with {} row(s) written to {}",
        report.table.len(),
        output_path.display()
    );

    Ok(report)
}
