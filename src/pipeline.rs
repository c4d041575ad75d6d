// ABOUTME: Pipeline - end-to-end run from catalog source to fetched audio files.
// ABOUTME: Resolves, merges, persists atomically, then fetches, reporting aggregate counts.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::capability::{
    FetchCapability, SearchCapability, YoutubeSearch, YtDlpFetcher, parse_video_id,
};
use crate::catalog::{Catalog, CatalogEntry, read_catalog, write_catalog};
use crate::config::PipelineConfig;
use crate::coordinator::ResolutionCoordinator;
use crate::error::TunefetchError;
use crate::fetch::{FetchOrchestrator, FetchReport};
use crate::playlist::read_tracklist;

/// Aggregate result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries newly resolved in this run.
    pub resolved: usize,

    /// Names the search could not resolve, in completion order.
    pub failed_to_resolve: Vec<String>,

    /// Fetch phase report. Empty when fetching was skipped.
    pub fetch: FetchReport,
}

impl RunSummary {
    /// True when nothing failed to resolve and nothing failed to fetch.
    pub fn is_success(&self) -> bool {
        self.failed_to_resolve.is_empty() && self.fetch.failed() == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} resolved, {} failed to resolve, {} fetched, {} failed to fetch, {} skipped",
            self.resolved,
            self.failed_to_resolve.len(),
            self.fetch.fetched(),
            self.fetch.failed(),
            self.fetch.skipped()
        )
    }
}

/// Wires the resolution coordinator and fetch orchestrator together.
pub struct Pipeline {
    config: PipelineConfig,
    coordinator: ResolutionCoordinator,
    orchestrator: FetchOrchestrator,
    fetch_enabled: bool,
}

impl Pipeline {
    /// Create a pipeline over explicit capabilities.
    pub fn new(
        config: PipelineConfig,
        search: Arc<dyn SearchCapability>,
        fetcher: Arc<dyn FetchCapability>,
    ) -> Self {
        Self {
            coordinator: ResolutionCoordinator::new(search, config.min_interval),
            orchestrator: FetchOrchestrator::new(fetcher),
            config,
            fetch_enabled: true,
        }
    }

    /// Create a pipeline backed by YouTube search and yt-dlp.
    pub fn from_config(config: PipelineConfig) -> Result<Self, TunefetchError> {
        let search = YoutubeSearch::new(config.search_timeout)?;
        let fetcher = YtDlpFetcher::new(config.ytdlp_program.clone())
            .audio_format(config.audio_format.clone());
        Ok(Self::new(config, Arc::new(search), Arc::new(fetcher)))
    }

    /// Stop after resolution; no files are fetched.
    pub fn resolve_only(mut self, resolve_only: bool) -> Self {
        self.fetch_enabled = !resolve_only;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run over a persisted catalog, writing the merged result to `output`.
    pub async fn run_catalog(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<RunSummary, TunefetchError> {
        let catalog = read_catalog(input)?;
        tracing::info!(path = %input.display(), entries = catalog.len(), "catalog loaded");
        self.process(catalog, Some(output)).await
    }

    /// Run over a tracklist text file, persisting the catalog to `output`.
    pub async fn run_playlist(
        &self,
        tracklist: &Path,
        output: &Path,
    ) -> Result<RunSummary, TunefetchError> {
        let catalog = read_tracklist(tracklist)?;
        write_catalog(output, &catalog)?;
        self.process(catalog, Some(output)).await
    }

    /// Run for a single song name or YouTube URL. Nothing is persisted.
    pub async fn run_single(&self, song: &str) -> Result<RunSummary, TunefetchError> {
        let entry = match parse_video_id(song) {
            Some(id) => CatalogEntry::resolved(id.clone(), id),
            None => CatalogEntry::new(song.trim()),
        };
        self.process(std::iter::once(entry).collect(), None).await
    }

    /// Resolve, merge, optionally persist, then fetch.
    ///
    /// Fails before any search if an entry has a blank name.
    pub async fn process(
        &self,
        mut catalog: Catalog,
        persist_to: Option<&Path>,
    ) -> Result<RunSummary, TunefetchError> {
        catalog.validate()?;
        let pending = catalog.unresolved();
        let outcome = self
            .coordinator
            .resolve(&pending, self.config.concurrency)
            .await;
        let resolved = catalog.merge(&outcome.updates);

        if let Some(path) = persist_to {
            write_catalog(path, &catalog)?;
            tracing::info!(path = %path.display(), "catalog saved");
        }

        let fetch = if self.fetch_enabled {
            self.orchestrator
                .fetch_all(&catalog, &self.config.download_dir)
                .await?
        } else {
            FetchReport::default()
        };

        let summary = RunSummary {
            resolved,
            failed_to_resolve: outcome.failures,
            fetch,
        };
        tracing::info!(%summary, "run finished");
        Ok(summary)
    }
}
