// ABOUTME: Derives filesystem-safe file stems from song names.
// ABOUTME: Falls back to the resolved identifier when nothing usable remains.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::CatalogEntry;

/// Longest stem produced, in characters, leaving room for an extension.
pub const MAX_STEM_LEN: usize = 250;

// Whitespace controls (\t \n \v \f \r) are left for WHITESPACE to collapse.
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[<>:"/\\|?*\x00-\x08\x0e-\x1f\x7f]"#).expect("valid pattern")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// Strip characters common filesystems reject, collapse whitespace, trim
/// leading and trailing spaces and dots, and cap the length.
///
/// May return an empty string.
pub fn sanitize_file_stem(name: &str) -> String {
    let stripped = DISALLOWED.replace_all(name, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    let trimmed = collapsed.trim_matches(|c| c == ' ' || c == '.');

    if trimmed.chars().count() <= MAX_STEM_LEN {
        return trimmed.to_string();
    }
    let capped: String = trimmed.chars().take(MAX_STEM_LEN).collect();
    capped.trim_end_matches([' ', '.']).to_string()
}

/// The file stem to fetch `entry` under.
pub fn target_stem(entry: &CatalogEntry) -> String {
    let stem = sanitize_file_stem(&entry.name);
    if stem.is_empty() {
        sanitize_file_stem(&entry.resolved_id)
    } else {
        stem
    }
}
