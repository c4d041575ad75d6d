// ABOUTME: Defines the SearchCapability and FetchCapability traits.
// ABOUTME: The resolution and fetch cores depend only on these seams.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::CapabilityError;

/// Maps a free-text query to at most one external identifier.
#[async_trait]
pub trait SearchCapability: Send + Sync {
    /// Search for `query`.
    ///
    /// Returns `Ok(None)` when nothing matched. Implementations make a single
    /// attempt; callers decide what a failure means.
    async fn search(&self, query: &str) -> Result<Option<String>, CapabilityError>;
}

/// Retrieves the artifact behind an identifier into the local filesystem.
#[async_trait]
pub trait FetchCapability: Send + Sync {
    /// Fetch `identifier` to `target`, a path without extension.
    ///
    /// Returns the final path of the written file.
    async fn fetch(&self, identifier: &str, target: &Path) -> Result<PathBuf, CapabilityError>;
}
