//! Data sources serving the site's documents
//!
//! The catalog and configuration are fetched by relative path (`config.json`,
//! `data/links.yml`, ...). A source is anything that can resolve such a path
//! to text.

use crate::error::SourceError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Asynchronous document fetcher
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch document text at a site-relative path
    async fn fetch(&self, path: &str) -> Result<String, SourceError>;
}

/// Documents read from a site root directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create source rooted at `root`
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Site root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DataSource for FsSource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        let full = self.root.join(path);
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| SourceError::io_error(full, e))
    }
}

/// Documents held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    /// Create empty source
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document
    #[must_use]
    pub fn with_document(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Insert or replace a document
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.documents.insert(path.into(), content.into());
    }

    /// Remove a document
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.documents.remove(path)
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<String, SourceError> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_string()))
    }
}
