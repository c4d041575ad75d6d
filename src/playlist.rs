// ABOUTME: Playlist ingestion - turns a pasted tracklist into an unresolved catalog.
// ABOUTME: Strips brackets, leading timestamps, and "ID - ID" placeholder lines.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Catalog, strip_bom};
use crate::error::CatalogError;

static BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\](){}]").expect("valid pattern"));

// Timestamps such as "1:02:33", "01:02", or "0102" at the start of a line.
static LONG_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:?\d{2}:?\d{2}\s*").expect("valid pattern"));
static SHORT_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}:?\d{2}\s*").expect("valid pattern"));

const UNKNOWN_TRACK: &str = "ID - ID";

/// Clean one tracklist line into a searchable song name.
///
/// Returns `None` for blank lines and unidentified-track placeholders.
pub fn clean_track_line(line: &str) -> Option<String> {
    let line = BRACKETS.replace_all(line, "");
    let line = LONG_TIMESTAMP.replace(&line, "");
    let line = SHORT_TIMESTAMP.replace(&line, "");
    let line = line.trim();

    if line.is_empty() || line == UNKNOWN_TRACK {
        None
    } else {
        Some(line.to_string())
    }
}

/// Build a catalog from tracklist text, one song per line.
pub fn parse_tracklist(text: &str) -> Catalog {
    Catalog::from_names(strip_bom(text).lines().filter_map(clean_track_line))
}

/// Read a tracklist file into a catalog.
pub fn read_tracklist(path: &Path) -> Result<Catalog, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_tracklist(&text);
    tracing::info!(path = %path.display(), songs = catalog.len(), "tracklist read");
    Ok(catalog)
}
