//! Navigator - top-level page controller
//!
//! Owns the configuration and the current catalog and threads them through
//! ingestion, grouping and rendering. There is no ambient state: everything
//! a view needs is captured in a [`PageView`] snapshot.

use crate::config::SiteConfig;
use crate::error::{ConfigError, NavError, NavResult};
use crate::page::render_page;
use crate::render::{RenderedView, Renderer};
use crate::session::SearchSession;
use std::path::Path;
use std::time::Duration;
use xgnav_catalog::{Catalog, DataSource, IngestError, Ingested, Ingestor};

/// Where the catalog stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    /// Nothing loaded yet
    #[default]
    Pending,
    /// Catalog available
    Ready(Catalog),
    /// No catalog could be loaded
    Failed {
        /// Diagnostic message
        message: String,
    },
}

/// Summary of a successful catalog load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    /// Format that produced the catalog
    pub format: &'static str,
    /// Path it was read from
    pub path: String,
    /// Number of links
    pub links: usize,
    /// Strategies skipped before it, with reasons
    pub skipped: Vec<String>,
}

impl From<&Ingested> for CatalogSummary {
    fn from(ingested: &Ingested) -> Self {
        Self {
            format: ingested.format,
            path: ingested.path.clone(),
            links: ingested.catalog.len(),
            skipped: ingested.skipped.clone(),
        }
    }
}

/// Outcome of [`Navigator::load`]; the two halves fail independently
#[derive(Debug)]
pub struct LoadReport {
    /// Configuration failure, if defaults are in use
    pub config_error: Option<ConfigError>,
    /// Catalog load result
    pub catalog: Result<CatalogSummary, IngestError>,
}

impl LoadReport {
    /// Whether a catalog is available
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.catalog.is_ok()
    }

    /// Catalog summary, or the ingestion error
    ///
    /// # Errors
    /// `NavError::Ingest` when no catalog could be produced.
    pub fn into_result(self) -> NavResult<CatalogSummary> {
        Ok(self.catalog?)
    }
}

/// Read-only snapshot of everything needed to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    renderer: Renderer,
    state: CatalogState,
}

impl PageView {
    /// Create snapshot
    #[inline]
    #[must_use]
    pub fn new(renderer: Renderer, state: CatalogState) -> Self {
        Self { renderer, state }
    }

    /// Catalog state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Total number of links in the catalog
    #[must_use]
    pub fn total(&self) -> usize {
        match &self.state {
            CatalogState::Ready(catalog) => catalog.len(),
            CatalogState::Pending | CatalogState::Failed { .. } => 0,
        }
    }

    /// Unfiltered view
    #[must_use]
    pub fn full(&self) -> RenderedView {
        match &self.state {
            CatalogState::Ready(catalog) => self.renderer.render_catalog(catalog),
            CatalogState::Pending => self.renderer.render_no_data(0),
            CatalogState::Failed { message } => self.renderer.render_failure(message),
        }
    }

    /// View filtered by `query`
    #[must_use]
    pub fn search(&self, query: &str) -> RenderedView {
        match &self.state {
            CatalogState::Ready(catalog) => self.renderer.render_search(catalog, query),
            CatalogState::Pending | CatalogState::Failed { .. } => self.full(),
        }
    }
}

/// Page controller
#[derive(Debug, Default)]
pub struct Navigator {
    config: SiteConfig,
    ingestor: Ingestor,
    state: CatalogState,
}

impl Navigator {
    /// Create navigator with default config and the default parser chain
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create navigator with a custom ingestor
    #[inline]
    #[must_use]
    pub fn with_ingestor(ingestor: Ingestor) -> Self {
        Self {
            ingestor,
            ..Self::default()
        }
    }

    /// Create navigator over an already loaded catalog
    #[must_use]
    pub fn from_parts(config: SiteConfig, catalog: Catalog) -> Self {
        Self {
            config,
            ingestor: Ingestor::new(),
            state: CatalogState::Ready(catalog),
        }
    }

    /// Current configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Current catalog state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Current catalog
    ///
    /// # Errors
    /// `NavError::NotLoaded` until a load has succeeded; failures
    /// themselves are reported by `load`/`reload`
    pub fn catalog(&self) -> NavResult<&Catalog> {
        match &self.state {
            CatalogState::Ready(catalog) => Ok(catalog),
            CatalogState::Pending | CatalogState::Failed { .. } => Err(NavError::NotLoaded),
        }
    }

    /// Load configuration and links concurrently
    ///
    /// A configuration failure falls back to defaults; a link failure puts
    /// the page in its failure state unless an earlier catalog is kept.
    /// Neither blocks the other.
    pub async fn load(&mut self, source: &dyn DataSource) -> LoadReport {
        let (config, links) = tokio::join!(SiteConfig::load(source), self.ingestor.ingest(source));

        let config_error = match config {
            Ok(config) => {
                self.config = config;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "configuration load failed, using defaults");
                self.config = SiteConfig::default();
                Some(e)
            }
        };

        LoadReport {
            config_error,
            catalog: self.apply_ingest(links),
        }
    }

    /// Re-run link ingestion only (the manual retry action)
    ///
    /// A catalog is only ever replaced by a successful load; when this
    /// fails after an earlier success the previous catalog stays in place.
    ///
    /// # Errors
    /// `IngestError` when every link source fails again.
    pub async fn reload(&mut self, source: &dyn DataSource) -> Result<CatalogSummary, IngestError> {
        let links = self.ingestor.ingest(source).await;
        self.apply_ingest(links)
    }

    fn apply_ingest(
        &mut self,
        links: Result<Ingested, IngestError>,
    ) -> Result<CatalogSummary, IngestError> {
        match links {
            Ok(ingested) => {
                let summary = CatalogSummary::from(&ingested);
                self.state = CatalogState::Ready(ingested.catalog);
                Ok(summary)
            }
            Err(e) if matches!(self.state, CatalogState::Ready(_)) => {
                tracing::warn!(error = %e, "link data failed to reload, keeping previous catalog");
                Err(e)
            }
            Err(e) => {
                tracing::error!(error = %e, "link data failed to load");
                self.state = CatalogState::Failed {
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Snapshot for rendering
    #[must_use]
    pub fn snapshot(&self) -> PageView {
        PageView::new(Renderer::from_config(&self.config), self.state.clone())
    }

    /// Unfiltered container view
    #[must_use]
    pub fn view(&self) -> RenderedView {
        self.snapshot().full()
    }

    /// Container view filtered by `query`
    #[must_use]
    pub fn search(&self, query: &str) -> RenderedView {
        self.snapshot().search(query)
    }

    /// Complete static document, optionally pre-filtered
    #[must_use]
    pub fn page(&self, query: Option<&str>) -> String {
        let view = match query {
            Some(query) => self.search(query),
            None => self.view(),
        };
        render_page(&self.config, &view, None)
    }

    /// Write the static document to `path`
    ///
    /// # Errors
    /// `NavError::Io` if the file cannot be written.
    pub async fn write_page(&self, path: impl AsRef<Path>, query: Option<&str>) -> NavResult<()> {
        let path = path.as_ref();
        tokio::fs::write(path, self.page(query))
            .await
            .map_err(|e| NavError::io_error(path, e))?;
        tracing::info!(path = %path.display(), "page written");
        Ok(())
    }

    /// Start a debounced search session over the current snapshot
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn search_session(&self, delay: Duration) -> SearchSession {
        SearchSession::new(self.snapshot(), delay)
    }
}
