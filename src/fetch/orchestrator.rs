// ABOUTME: FetchOrchestrator - walks resolved catalog entries and fetches each in order.
// ABOUTME: Per-entry failures are recorded and skipped past; only setup errors abort.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::FutureExt;

use super::target_stem;
use crate::capability::FetchCapability;
use crate::catalog::Catalog;
use crate::error::FetchError;

/// What happened to one catalog entry during the fetch phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The artifact was written to `path`.
    Fetched { path: PathBuf },
    /// The fetch capability failed for this entry.
    Failed { message: String },
    /// The entry had no identifier and was not attempted.
    Skipped,
}

/// Per-entry line of a [`FetchReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub name: String,
    pub resolved_id: Option<String>,
    pub outcome: FetchOutcome,
}

/// Result of a fetch pass, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub entries: Vec<EntryReport>,
}

impl FetchReport {
    pub fn fetched(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Fetched { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Skipped))
    }

    /// Entries the fetch capability was actually invoked for.
    pub fn attempted(&self) -> usize {
        self.fetched() + self.failed()
    }

    /// Entries whose fetch failed, with the capability's message.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|e| match &e.outcome {
            FetchOutcome::Failed { message } => Some((e.name.as_str(), message.as_str())),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&FetchOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

impl fmt::Display for FetchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fetched, {} failed, {} skipped",
            self.fetched(),
            self.failed(),
            self.skipped()
        )
    }
}

/// Sequentially fetches every resolved entry of a catalog.
///
/// There is no concurrency here: the fetch capability is the bottleneck and
/// attempts happen strictly in catalog order.
pub struct FetchOrchestrator {
    fetcher: Arc<dyn FetchCapability>,
}

impl FetchOrchestrator {
    pub fn new(fetcher: Arc<dyn FetchCapability>) -> Self {
        Self { fetcher }
    }

    /// Fetch all resolved entries of `catalog` into `destination`.
    ///
    /// Returns `Err` only if the destination directory cannot be created.
    pub async fn fetch_all(
        &self,
        catalog: &Catalog,
        destination: &Path,
    ) -> Result<FetchReport, FetchError> {
        tokio::fs::create_dir_all(destination)
            .await
            .map_err(|source| FetchError::Destination {
                path: destination.to_path_buf(),
                source,
            })?;

        let mut report = FetchReport::default();
        for entry in catalog.iter() {
            let Some(id) = entry.resolved_id() else {
                tracing::info!(name = %entry.name, "no identifier, skipping");
                report.entries.push(EntryReport {
                    name: entry.name.clone(),
                    resolved_id: None,
                    outcome: FetchOutcome::Skipped,
                });
                continue;
            };

            let target = destination.join(target_stem(entry));
            tracing::info!(name = %entry.name, id, "fetching");

            let attempt = AssertUnwindSafe(self.fetcher.fetch(id, &target))
                .catch_unwind()
                .await;

            let outcome = match attempt {
                Ok(Ok(path)) => {
                    tracing::info!(name = %entry.name, path = %path.display(), "fetched");
                    FetchOutcome::Fetched { path }
                }
                Ok(Err(e)) => {
                    tracing::warn!(name = %entry.name, error = %e, "fetch failed");
                    FetchOutcome::Failed {
                        message: e.to_string(),
                    }
                }
                Err(_) => {
                    tracing::warn!(name = %entry.name, "fetch capability panicked");
                    FetchOutcome::Failed {
                        message: "fetch capability panicked".to_string(),
                    }
                }
            };

            report.entries.push(EntryReport {
                name: entry.name.clone(),
                resolved_id: Some(id.to_string()),
                outcome,
            });
        }

        tracing::info!(
            fetched = report.fetched(),
            failed = report.failed(),
            skipped = report.skipped(),
            "fetch finished"
        );
        Ok(report)
    }
}
