//! Link data parsers for the supported source formats
//!
//! Provides parsing from source documents into [`LinkRecord`]s:
//! - Structured (YAML) documents via serde_yaml
//! - Delimited text, one record per line
//!
//! Parsers are strategies: a [`ParserChain`] holds them in priority order
//! and ingestion tries each until one yields records.

use crate::error::ParseError;
use crate::model::LinkRecord;

mod delimited;
mod structured;

pub use delimited::DelimitedParser;
pub use structured::{EntrySpec, StructuredParser};

/// Result of running one parser over a document
#[derive(Debug)]
pub enum ParseOutcome {
    /// At least one usable record
    Parsed(Vec<LinkRecord>),
    /// Document was readable but held no usable records
    Empty,
    /// Document could not be parsed
    Failed(ParseError),
}

impl ParseOutcome {
    /// Wrap records, collapsing an empty list into [`ParseOutcome::Empty`]
    #[must_use]
    pub fn from_records(records: Vec<LinkRecord>) -> Self {
        if records.is_empty() {
            Self::Empty
        } else {
            Self::Parsed(records)
        }
    }

    /// Records, if parsing succeeded
    #[must_use]
    pub fn into_records(self) -> Option<Vec<LinkRecord>> {
        match self {
            Self::Parsed(records) => Some(records),
            Self::Empty | Self::Failed(_) => None,
        }
    }
}

/// Parser trait for converting a source document into link records
///
/// Implement this trait to add support for new data formats.
pub trait LinkParser: Send + Sync {
    /// Short format identifier, used in logs and cache keys
    fn format(&self) -> &'static str;

    /// Path of the data file this parser reads by default
    fn source_path(&self) -> &str;

    /// Parse document text
    ///
    /// Must never panic on malformed input; failures are reported through
    /// [`ParseOutcome::Failed`].
    fn parse(&self, content: &str) -> ParseOutcome;
}

/// Ordered list of parser strategies, tried first to last
pub struct ParserChain {
    parsers: Vec<Box<dyn LinkParser>>,
}

impl Default for ParserChain {
    fn default() -> Self {
        default_chain()
    }
}

impl std::fmt::Debug for ParserChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserChain")
            .field("formats", &self.formats())
            .finish()
    }
}

impl ParserChain {
    /// Create empty chain
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Append a strategy after those already registered
    #[must_use]
    pub fn then<P: LinkParser + 'static>(mut self, parser: P) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Strategies in the order they are tried
    pub fn iter(&self) -> impl Iterator<Item = &dyn LinkParser> {
        self.parsers.iter().map(|p| &**p)
    }

    /// Format identifiers in order
    #[must_use]
    pub fn formats(&self) -> Vec<&'static str> {
        self.iter().map(|p| p.format()).collect()
    }

    /// Number of strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// True when no strategy is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

/// Structured format first, delimited text as the fallback
#[must_use]
pub fn default_chain() -> ParserChain {
    ParserChain::new()
        .then(StructuredParser::new())
        .then(DelimitedParser::new())
}
