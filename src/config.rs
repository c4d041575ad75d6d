// ABOUTME: PipelineConfig - knobs for resolution, fetching, and the external tools.
// ABOUTME: Builder-style setters plus TUNEFETCH_* environment overrides.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const ENV_CONCURRENCY: &str = "TUNEFETCH_CONCURRENCY";
pub const ENV_MIN_INTERVAL_MS: &str = "TUNEFETCH_MIN_INTERVAL_MS";
pub const ENV_DOWNLOAD_DIR: &str = "TUNEFETCH_DOWNLOAD_DIR";
pub const ENV_SEARCH_TIMEOUT_SECS: &str = "TUNEFETCH_SEARCH_TIMEOUT_SECS";
pub const ENV_YTDLP: &str = "TUNEFETCH_YTDLP";
pub const ENV_AUDIO_FORMAT: &str = "TUNEFETCH_AUDIO_FORMAT";

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum searches in flight at once.
    pub concurrency: NonZeroUsize,

    /// Minimum spacing between any two search calls.
    pub min_interval: Duration,

    /// Directory audio files are written to.
    pub download_dir: PathBuf,

    /// Per-request timeout for the search capability.
    pub search_timeout: Duration,

    /// The yt-dlp executable.
    pub ytdlp_program: PathBuf,

    /// Audio format requested from yt-dlp.
    pub audio_format: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: NonZeroUsize::new(3).unwrap_or(NonZeroUsize::MIN),
            min_interval: Duration::from_secs(1),
            download_dir: PathBuf::from("downloads"),
            search_timeout: Duration::from_secs(30),
            ytdlp_program: PathBuf::from("yt-dlp"),
            audio_format: "wav".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with any `TUNEFETCH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`, keyed by the `ENV_*` names.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_CONCURRENCY) {
            self.concurrency = parse(ENV_CONCURRENCY, &v)?;
        }
        if let Some(v) = lookup(ENV_MIN_INTERVAL_MS) {
            self.min_interval = Duration::from_millis(parse(ENV_MIN_INTERVAL_MS, &v)?);
        }
        if let Some(v) = lookup(ENV_DOWNLOAD_DIR) {
            self.download_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_SEARCH_TIMEOUT_SECS) {
            self.search_timeout = Duration::from_secs(parse(ENV_SEARCH_TIMEOUT_SECS, &v)?);
        }
        if let Some(v) = lookup(ENV_YTDLP) {
            self.ytdlp_program = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_AUDIO_FORMAT) {
            self.audio_format = v;
        }
        Ok(self)
    }

    pub fn concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub fn ytdlp_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.ytdlp_program = program.into();
        self
    }

    pub fn audio_format(mut self, format: impl Into<String>) -> Self {
        self.audio_format = format.into();
        self
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
