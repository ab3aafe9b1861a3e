use crate::catalog;
use crate::context::AppContext;
use crate::export::write_catalog;
use anyhow::Result;
use log::info;

/// Returns the grouped listing when reading from cache, `None` after an update
/// or when no cache exists yet.
pub async fn run(app: &AppContext, update: bool) -> Result<Option<String>> {
    let catalog_path = app.catalog_path();

    if update {
        info!("Refreshing coin catalog into {}", catalog_path.display());
        let payload = app.coingecko()?.fetch_coins_list().await?;
        let count = payload.as_array().map(Vec::len).unwrap_or_default();
        write_catalog(catalog_path, &payload)?;
        info!("Stored {} catalog entries", count);
        println!(
            "List of coins updated and saved to {}",
            catalog_path.display()
        );
        return Ok(None);
    }

    let listing = catalog::cached_listing(catalog_path)?;
    if listing.is_none() {
        info!(
            "No coin catalog cached at {}; run `list --update` first",
            catalog_path.display()
        );
    }
    Ok(listing)
}
