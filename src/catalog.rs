use crate::models::CatalogEntry;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const ENTRIES_PER_LINE: usize = 4;

pub fn format_entry(entry: &CatalogEntry) -> String {
    format!("[name->{} ID->{}] | ", entry.name, entry.id)
}

/// Renders entries four per line. N entries always produce `ceil(N/4)` lines.
pub fn render_grouped(entries: &[CatalogEntry]) -> String {
    entries
        .chunks(ENTRIES_PER_LINE)
        .map(|chunk| chunk.iter().map(format_entry).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads the cached catalog. A missing cache file is not an error.
pub fn load_cached(path: &Path) -> Result<Option<Vec<CatalogEntry>>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading coin catalog at {}", path.display()))?;
    let entries: Vec<CatalogEntry> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing coin catalog at {}", path.display()))?;
    Ok(Some(entries))
}

pub fn cached_listing(path: &Path) -> Result<Option<String>> {
    Ok(load_cached(path)?.map(|entries| render_grouped(&entries)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            symbol: String::new(),
            name: name.to_string(),
        }
    }

    fn entries(count: usize) -> Vec<CatalogEntry> {
        (0..count)
            .map(|i| entry(&format!("coin-{i}"), &format!("Coin {i}")))
            .collect()
    }

    #[test]
    fn entry_token_format() {
        assert_eq!(
            format_entry(&entry("bitcoin", "Bitcoin")),
            "[name->Bitcoin ID->bitcoin] | "
        );
    }

    #[test]
    fn grouping_produces_ceil_n_over_four_lines() {
        for count in [1usize, 3, 4, 5, 8, 9, 13] {
            let rendered = render_grouped(&entries(count));
            let lines: Vec<&str> = rendered.split('\n').collect();
            assert_eq!(lines.len(), count.div_ceil(4), "count={count}");
            for line in &lines {
                assert!(line.matches("] | ").count() <= 4);
                assert!(line.starts_with("[name->"));
            }
        }
    }

    #[test]
    fn grouping_keeps_catalog_order() {
        let rendered = render_grouped(&entries(5));
        assert_eq!(
            rendered,
            "[name->Coin 0 ID->coin-0] | [name->Coin 1 ID->coin-1] | \
             [name->Coin 2 ID->coin-2] | [name->Coin 3 ID->coin-3] | \n\
             [name->Coin 4 ID->coin-4] | "
        );
    }

    #[test]
    fn empty_catalog_renders_nothing() {
        assert_eq!(render_grouped(&[]), "");
    }

    #[test]
    fn missing_cache_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load_cached(&path).unwrap().is_none());
        assert!(cached_listing(&path).unwrap().is_none());
    }

    #[test]
    fn cached_listing_reads_api_shaped_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list_of_coins.json");
        fs::write(
            &path,
            r#"[
    {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin"},
    {"id": "ethereum", "symbol": "eth", "name": "Ethereum"}
]"#,
        )
        .unwrap();

        let listing = cached_listing(&path).unwrap().unwrap();
        assert_eq!(
            listing,
            "[name->Bitcoin ID->bitcoin] | [name->Ethereum ID->ethereum] | "
        );
    }

    #[test]
    fn corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list_of_coins.json");
        fs::write(&path, "[{\"id\": ").unwrap();
        assert!(load_cached(&path).is_err());
    }
}
