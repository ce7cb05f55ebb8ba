//! Catalog ingestion with ordered format fallback
//!
//! ```text
//! DataSource ──fetch──▶ ParserChain[0] ──Empty/Failed──▶ ParserChain[1] ──▶ ... ──▶ IngestError
//!                            │ Parsed
//!                            ▼
//!                         Catalog  ◀──▶ CatalogCache
//! ```

use crate::cache::{CatalogCache, ContentKey};
use crate::error::{AttemptFailure, FailedAttempt, IngestError, IngestResult};
use crate::model::Catalog;
use crate::parsers::{default_chain, LinkParser, ParseOutcome, ParserChain};
use crate::source::DataSource;

/// Successful ingestion
#[derive(Debug, Clone)]
pub struct Ingested {
    /// The loaded catalog, never empty
    pub catalog: Catalog,
    /// Format identifier of the strategy that produced it
    pub format: &'static str,
    /// Path the catalog was read from
    pub path: String,
    /// Strategies that were tried and skipped first
    pub skipped: Vec<String>,
}

/// Runs the parser chain against a data source
#[derive(Debug, Default)]
pub struct Ingestor {
    chain: ParserChain,
    cache: CatalogCache,
}

impl Ingestor {
    /// Create ingestor with the default chain (structured, then delimited)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_chain(default_chain())
    }

    /// Create ingestor with a custom chain
    #[inline]
    #[must_use]
    pub fn with_chain(chain: ParserChain) -> Self {
        Self {
            chain,
            cache: CatalogCache::default(),
        }
    }

    /// Parser chain in use
    #[inline]
    #[must_use]
    pub fn chain(&self) -> &ParserChain {
        &self.chain
    }

    /// Parse cache in use
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Load a catalog, trying each strategy in order
    ///
    /// # Errors
    /// - `IngestError::NoStrategies` if the chain is empty
    /// - `IngestError::Exhausted` if every strategy was unavailable,
    ///   malformed or empty
    pub async fn ingest(&self, source: &dyn DataSource) -> IngestResult<Ingested> {
        if self.chain.is_empty() {
            return Err(IngestError::NoStrategies);
        }

        let mut attempts = Vec::new();
        for parser in self.chain.iter() {
            let path = parser.source_path().to_string();
            match self.attempt(parser, source).await {
                Ok(catalog) => {
                    tracing::info!(
                        format = parser.format(),
                        %path,
                        links = catalog.len(),
                        "catalog loaded"
                    );
                    let skipped = attempts.iter().map(ToString::to_string).collect();
                    return Ok(Ingested {
                        catalog,
                        format: parser.format(),
                        path,
                        skipped,
                    });
                }
                Err(failure) => {
                    tracing::warn!(
                        format = parser.format(),
                        %path,
                        reason = %failure,
                        "link source skipped"
                    );
                    attempts.push(FailedAttempt {
                        format: parser.format(),
                        path,
                        failure,
                    });
                }
            }
        }

        Err(IngestError::Exhausted { attempts })
    }

    async fn attempt(
        &self,
        parser: &dyn LinkParser,
        source: &dyn DataSource,
    ) -> Result<Catalog, AttemptFailure> {
        let text = source.fetch(parser.source_path()).await?;

        let key = ContentKey::compute(parser.format(), &text);
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(format = parser.format(), key = %key.short(), "parse cache hit");
            return Ok(cached);
        }

        let catalog = match parser.parse(&text) {
            ParseOutcome::Parsed(records) => Catalog::new(records),
            ParseOutcome::Empty => return Err(AttemptFailure::Empty),
            ParseOutcome::Failed(e) => return Err(AttemptFailure::Malformed(e)),
        };
        self.cache.insert(key, catalog.clone()).await;
        Ok(catalog)
    }
}
