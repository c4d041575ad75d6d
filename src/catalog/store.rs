// ABOUTME: JSON persistence for catalogs - BOM-tolerant reads, atomic writes.
// ABOUTME: Writes go to a temporary sibling file that is renamed over the target.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::Catalog;
use crate::error::CatalogError;

const BOM: char = '\u{feff}';

/// Remove a leading UTF-8 byte-order mark, if present.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Parse a catalog from JSON text. `path` is only used for error reporting.
pub fn from_json_str(text: &str, path: &Path) -> Result<Catalog, CatalogError> {
    let catalog: Catalog =
        serde_json::from_str(strip_bom(text)).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    catalog.validate()?;
    Ok(catalog)
}

/// Render a catalog as pretty JSON without a byte-order mark.
pub fn to_json_string(catalog: &Catalog) -> Result<String, CatalogError> {
    let mut text = serde_json::to_string_pretty(catalog)?;
    text.push('\n');
    Ok(text)
}

/// Read and validate a persisted catalog.
pub fn read_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_json_str(&text, path)
}

/// Persist a catalog atomically.
///
/// Readers of `path` observe either the previous contents or the complete
/// new contents, never a truncated file.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let text = to_json_string(catalog)?;
    let temp = temp_path(path);

    let result = write_and_sync(&temp, text.as_bytes()).and_then(|()| fs::rename(&temp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&temp);
        return Err(CatalogError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::debug!(path = %path.display(), entries = catalog.len(), "catalog written");
    Ok(())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog.json".to_string());
    let temp_name = format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple());
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(temp_name),
        _ => PathBuf::from(temp_name),
    }
}
