// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use tunefetch::prelude::*;` to get started quickly.

pub use crate::capability::{
    FetchCapability, SearchCapability, YoutubeSearch, YtDlpFetcher, parse_video_id, watch_url,
};
pub use crate::catalog::{Catalog, CatalogEntry, read_catalog, write_catalog};
pub use crate::config::PipelineConfig;
pub use crate::coordinator::{
    RateLimiter, ResolutionCoordinator, ResolutionOutcome, ResolutionResult, SearchWorker,
};
pub use crate::error::{CapabilityError, CatalogError, ConfigError, FetchError, TunefetchError};
pub use crate::fetch::{
    EntryReport, FetchOrchestrator, FetchOutcome, FetchReport, sanitize_file_stem, target_stem,
};
pub use crate::pipeline::{Pipeline, RunSummary};
pub use crate::playlist::{clean_track_line, parse_tracklist, read_tracklist};
