// ABOUTME: Defines all error types for the tunefetch library using thiserror.
// ABOUTME: Each concern has its own error enum, unified under TunefetchError.

use std::path::PathBuf;

/// Top-level error type for the tunefetch library.
///
/// Only systemic failures surface here. Per-entry search and fetch failures
/// are recorded in the run reports instead.
#[derive(Debug, thiserror::Error)]
pub enum TunefetchError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),
}

/// Errors reading, parsing, or writing a persisted catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Errors raised by an external search or fetch capability.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{program} exited with code {code}: {stderr}")]
    Process {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("{0}")]
    Unexpected(String),
}

/// Systemic failures of the fetch phase.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("cannot create destination directory {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}
