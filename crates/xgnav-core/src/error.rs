//! Error types for XG-Nav core
//!
//! Configuration and link data fail independently: a [`ConfigError`] only
//! ever downgrades the page to default settings, while an ingestion failure
//! puts the page into its retryable failure state.

use std::path::PathBuf;
use xgnav_catalog::{IngestError, SourceError};

/// Configuration load errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Document could not be fetched
    #[error("configuration unavailable: {0}")]
    Unavailable(#[from] SourceError),

    /// Document is not valid configuration JSON
    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Main navigator error type
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// No catalog could be produced
    #[error("link data failed to load: {0}")]
    Ingest(#[from] IngestError),

    /// Catalog has not been loaded yet
    #[error("link data not loaded")]
    NotLoaded,

    /// IO error writing output
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NavError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if a manual retry may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Ingest(_) | Self::NotLoaded)
    }
}

/// Result type alias for navigator operations
pub type NavResult<T> = Result<T, NavError>;
