//! Content-addressed cache of parsed catalogs using moka
//!
//! Re-ingesting a document whose text has not changed (a manual retry, a
//! periodic rebuild) reuses the records parsed the first time.

use crate::model::Catalog;
use moka::future::Cache;
use std::fmt;

/// Key of a parsed document: blake3 over the format id and the text
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentKey([u8; 32]);

impl ContentKey {
    /// Compute key for a document parsed with `format`
    #[must_use]
    pub fn compute(format: &str, content: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(format.as_bytes());
        hasher.update(&[0]);
        hasher.update(content.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Short hex form for logs
    #[must_use]
    pub fn short(&self) -> String {
        self.0[..6].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentKey({})", self.short())
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Parsed catalogs by content key
#[derive(Debug, Clone)]
pub struct CatalogCache {
    inner: Cache<ContentKey, Catalog>,
}

impl CatalogCache {
    /// Create cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Insert parsed catalog
    #[inline]
    pub async fn insert(&self, key: ContentKey, catalog: Catalog) {
        self.inner.insert(key, catalog).await;
    }

    /// Get parsed catalog
    #[inline]
    pub async fn get(&self, key: &ContentKey) -> Option<Catalog> {
        self.inner.get(key).await
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    ///
    /// Counts are approximate until pending maintenance has run.
    #[inline]
    pub async fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks().await;
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }
}

impl Default for CatalogCache {
    /// Create cache with default capacity (64 documents)
    fn default() -> Self {
        Self::new(64)
    }
}
