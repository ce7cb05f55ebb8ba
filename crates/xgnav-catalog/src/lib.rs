//! XG-Nav Link Catalog
//!
//! The boundary between the site's data files and the in-memory catalog
//! every other component reads from.
//!
//! # Core Operations
//!
//! - **Fetch**: read a data document through a [`DataSource`]
//! - **Parse**: turn it into [`LinkRecord`]s with a [`LinkParser`] strategy
//! - **Ingest**: walk the [`ParserChain`] until one strategy yields records
//!
//! # Architecture
//!
//! ```text
//! data/links.yml ─▶ StructuredParser ─┐
//!                                     ├─▶ Ingestor ─▶ Catalog
//! data/links.txt ─▶ DelimitedParser ──┘      ↕
//!                                       CatalogCache
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use xgnav_catalog::{FsSource, Ingestor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = FsSource::new("site");
//! let ingested = Ingestor::new().ingest(&source).await?;
//! println!("{} links from {}", ingested.catalog.len(), ingested.path);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod cache;
pub mod error;
pub mod ingest;
pub mod model;
pub mod parsers;
pub mod source;

// Re-exports for convenience
pub use cache::{CacheStats, CatalogCache, ContentKey};
pub use error::{AttemptFailure, FailedAttempt, IngestError, ParseError, SourceError};
pub use ingest::{Ingested, Ingestor};
pub use model::{normalize_url, Catalog, LinkRecord, UNCATEGORIZED};
pub use parsers::{
    default_chain, DelimitedParser, EntrySpec, LinkParser, ParseOutcome, ParserChain,
    StructuredParser,
};
pub use source::{DataSource, FsSource, MemorySource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the link catalog
    pub use crate::error::{IngestError, ParseError, SourceError};
    pub use crate::ingest::{Ingested, Ingestor};
    pub use crate::model::{Catalog, LinkRecord};
    pub use crate::parsers::{LinkParser, ParseOutcome, ParserChain};
    pub use crate::source::{DataSource, FsSource, MemorySource};
}
