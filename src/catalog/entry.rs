// ABOUTME: Catalog and CatalogEntry types - the name / resolved-id pairs of a run.
// ABOUTME: Merging joins resolution updates back by name, keeping unknown fields intact.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::CatalogError;

/// A single song in the catalog.
///
/// The identifier is written as `youtube_id`. On read, `youtube_id`,
/// `resolved_id` and `resolvedId` are all accepted; the first non-empty one
/// in that order wins, so records carrying several of them still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct CatalogEntry {
    /// Display name, used verbatim as the search query. Not unique.
    pub name: String,

    /// External video identifier. Empty means unresolved.
    #[serde(rename = "youtube_id")]
    pub resolved_id: String,

    /// Fields this crate does not interpret, carried through persistence.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    /// Create an unresolved entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolved_id: String::new(),
            extra: Map::new(),
        }
    }

    /// Create an entry that already carries an identifier.
    pub fn resolved(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resolved_id: id.into(),
            ..Self::new(name)
        }
    }

    /// Whether this entry has a non-empty identifier.
    pub fn is_resolved(&self) -> bool {
        !self.resolved_id.is_empty()
    }

    /// The identifier, if resolved.
    pub fn resolved_id(&self) -> Option<&str> {
        if self.is_resolved() {
            Some(&self.resolved_id)
        } else {
            None
        }
    }
}

/// On-disk shape of an entry, before the identifier keys are reconciled.
#[derive(Deserialize)]
struct RawEntry {
    name: String,

    #[serde(default, deserialize_with = "nullable_string")]
    youtube_id: String,

    #[serde(default, deserialize_with = "nullable_string")]
    resolved_id: String,

    #[serde(rename = "resolvedId", default, deserialize_with = "nullable_string")]
    resolved_id_camel: String,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawEntry> for CatalogEntry {
    fn from(raw: RawEntry) -> Self {
        let resolved_id = [raw.youtube_id, raw.resolved_id, raw.resolved_id_camel]
            .into_iter()
            .find(|id| !id.is_empty())
            .unwrap_or_default();
        Self {
            name: raw.name,
            resolved_id,
            extra: raw.extra,
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered collection of entries, in source playlist order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "songs", default)]
    pub entries: Vec<CatalogEntry>,

    /// Record-level fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an unresolved catalog from display names, preserving order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names.into_iter().map(CatalogEntry::new).collect(),
            extra: Map::new(),
        }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Snapshot of the entries still lacking an identifier, in catalog order.
    ///
    /// This is what callers hand to the resolution coordinator.
    pub fn unresolved(&self) -> Vec<CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| !e.is_resolved())
            .cloned()
            .collect()
    }

    /// Number of entries carrying an identifier.
    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_resolved()).count()
    }

    /// Apply name → identifier updates from a resolution pass.
    ///
    /// The name is the join key: every still-unresolved entry with a matching
    /// name receives the identifier, so duplicate names share one result.
    /// Entries that already carry an identifier are never overwritten.
    /// Returns the number of entries updated.
    pub fn merge(&mut self, updates: &HashMap<String, String>) -> usize {
        let mut updated = 0;
        for entry in self.entries.iter_mut().filter(|e| !e.is_resolved()) {
            if let Some(id) = updates.get(&entry.name) {
                if id.is_empty() {
                    continue;
                }
                entry.resolved_id = id.clone();
                updated += 1;
            }
        }
        updated
    }

    /// Check the entry invariants that the persisted format cannot express.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(CatalogError::InvalidEntry {
                    index,
                    reason: "name is empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            extra: Map::new(),
        }
    }
}
