//! Error types for the link catalog
//!
//! Provides error handling for:
//! - Fetching source documents (data unavailable)
//! - Parsing source documents (data malformed)
//! - Ingestion once every parser strategy is exhausted

use std::fmt;
use std::path::PathBuf;

/// Errors while fetching a source document
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Document does not exist at the source
    #[error("not found: {0}")]
    NotFound(String),

    /// IO error during read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Create IO error for path, mapping a missing file to `NotFound`
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.display().to_string())
        } else {
            Self::Io { path, source }
        }
    }
}

/// Errors while parsing a fetched document
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Syntax error in source document
    #[error("syntax error in {format} document: {message}")]
    SyntaxError {
        format: &'static str,
        message: String,
    },

    /// Document parsed but has an unusable shape
    #[error("malformed {format} document: {message}")]
    Malformed {
        format: &'static str,
        message: String,
    },
}

impl ParseError {
    /// Create syntax error for format
    pub fn syntax_error(format: &'static str, message: impl Into<String>) -> Self {
        Self::SyntaxError {
            format,
            message: message.into(),
        }
    }

    /// Create malformed-shape error for format
    pub fn malformed(format: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            format,
            message: message.into(),
        }
    }
}

/// Why a single parser strategy did not produce a catalog
#[derive(Debug, thiserror::Error)]
pub enum AttemptFailure {
    /// Source could not be fetched
    #[error("data unavailable: {0}")]
    Unavailable(#[from] SourceError),

    /// Source could not be parsed
    #[error("data malformed: {0}")]
    Malformed(#[from] ParseError),

    /// Source parsed to zero usable records
    #[error("no usable records")]
    Empty,
}

/// One failed strategy during ingestion
#[derive(Debug)]
pub struct FailedAttempt {
    /// Format identifier of the strategy
    pub format: &'static str,
    /// Path the strategy fetched
    pub path: String,
    /// Failure reason
    pub failure: AttemptFailure,
}

impl fmt::Display for FailedAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.format, self.path, self.failure)
    }
}

/// Errors during ingestion
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The parser chain has no strategies
    #[error("no parser strategies configured")]
    NoStrategies,

    /// Every strategy failed or produced nothing
    #[error("all {} link sources failed: {}", .attempts.len(), summarize(.attempts))]
    Exhausted { attempts: Vec<FailedAttempt> },
}

impl IngestError {
    /// Failed attempts, in the order they were tried
    #[must_use]
    pub fn attempts(&self) -> &[FailedAttempt] {
        match self {
            Self::NoStrategies => &[],
            Self::Exhausted { attempts } => attempts,
        }
    }
}

fn summarize(attempts: &[FailedAttempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for ingestion
pub type IngestResult<T> = Result<T, IngestError>;
