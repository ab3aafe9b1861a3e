use crate::models::PriceRow;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const PRICE_HEADER: [&str; 3] = ["name", "price", "date"];

/// Same request mode as a plain `File::create`; the process umask still applies.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

/// Writes `path` through a temp file in the same directory and renames it into place.
/// The temp file is removed if `write` fails, so `path` is either untouched or complete.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<()>,
{
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create output directory {}", parent.display()))?;

    let mut temp = create_temp_for(path, parent)?;
    {
        let mut writer = BufWriter::new(&mut temp);
        write(&mut writer)?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", path.display()))?;
    }
    temp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to sync {}", path.display()))?;
    temp.persist(path)
        .with_context(|| format!("Failed to move temp file into {}", path.display()))?;
    Ok(())
}

/// Temp files default to 0600; an overwritten target keeps its mode and a new
/// one gets what `File::create` would have given it.
fn create_temp_for(path: &Path, parent: &Path) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
    }
    let temp = builder
        .tempfile_in(parent)
        .with_context(|| format!("Unable to create temp file in {}", parent.display()))?;

    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
    }
    Ok(temp)
}

/// Catalog cache: the API payload as-is, indented with four spaces.
pub fn write_catalog(path: &Path, payload: &Value) -> Result<()> {
    write_atomically(path, |writer| {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        payload
            .serialize(&mut serializer)
            .context("Failed to serialize coin catalog")
    })
}

/// Price table as CSV. The header is written even when `rows` is empty.
pub fn write_price_table(path: &Path, rows: &[PriceRow]) -> Result<()> {
    write_atomically(path, |writer| {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(PRICE_HEADER)?;
        for row in rows {
            csv_writer
                .serialize(row)
                .with_context(|| format!("Failed to write price row for {}", row.name))?;
        }
        csv_writer.flush().context("Failed to flush price table")?;
        Ok(())
    })
}
