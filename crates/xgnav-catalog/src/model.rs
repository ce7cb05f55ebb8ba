//! Link record model
//!
//! Every parsed entry, whatever its source format, is converted into a
//! [`LinkRecord`]. A [`Catalog`] is the ordered, immutable collection of
//! records produced by one successful load.

use serde::Serialize;
use std::ops::Deref;
use std::sync::Arc;

/// Category assigned when a source entry does not name one
pub const UNCATEGORIZED: &str = "其他";

/// Normalize a link target to a schema-qualified URL
///
/// Targets already starting with `http://` or `https://` are kept as-is,
/// anything else gets an `http://` prefix.
///
/// # Example
///
/// ```rust
/// use xgnav_catalog::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), "http://example.com");
/// assert_eq!(normalize_url("https://x.io"), "https://x.io");
/// ```
#[must_use]
pub fn normalize_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

/// One navigable bookmark
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LinkRecord {
    title: String,
    description: String,
    url: String,
    category: String,
    icon: Option<String>,
}

impl LinkRecord {
    /// Build a record from raw field values
    ///
    /// Fields are trimmed, the URL is normalized and an empty category
    /// falls back to [`UNCATEGORIZED`]. Returns `None` when the title or
    /// URL is empty after trimming.
    #[must_use]
    pub fn new(
        title: impl AsRef<str>,
        description: impl AsRef<str>,
        url: impl AsRef<str>,
        category: Option<&str>,
    ) -> Option<Self> {
        let title = title.as_ref().trim();
        let url = url.as_ref().trim();
        if title.is_empty() || url.is_empty() {
            return None;
        }

        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);

        Some(Self {
            title: title.to_string(),
            description: description.as_ref().trim().to_string(),
            url: normalize_url(url),
            category: category.to_string(),
            icon: None,
        })
    }

    /// Attach an icon specifier; blank specifiers are ignored
    #[must_use]
    pub fn with_icon(mut self, icon: Option<&str>) -> Self {
        self.icon = icon
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .map(str::to_string);
        self
    }

    /// Display title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description, possibly empty
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Normalized target URL
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Category label, never empty
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Icon specifier, if the source provided one
    #[inline]
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// The four searchable text fields
    #[inline]
    #[must_use]
    pub fn text_fields(&self) -> [&str; 4] {
        [&self.title, &self.description, &self.url, &self.category]
    }
}

/// Ordered collection of link records, in source order
///
/// Cloning is cheap; the records are shared and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Arc<[LinkRecord]>,
}

impl Catalog {
    /// Create catalog from records
    #[must_use]
    pub fn new(records: Vec<LinkRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Empty catalog
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Read-only view of all records
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Catalog {
    type Target = [LinkRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<LinkRecord>> for Catalog {
    fn from(records: Vec<LinkRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_adds_scheme() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
        assert_eq!(normalize_url("https://x.io"), "https://x.io");
        assert_eq!(normalize_url("http://x.io/a?b=c"), "http://x.io/a?b=c");
    }

    #[test]
    fn normalize_is_case_sensitive_on_scheme() {
        // Only lower-case schemes count as qualified
        assert_eq!(normalize_url("HTTPS://x.io"), "http://HTTPS://x.io");
    }

    #[test]
    fn record_trims_and_normalizes() {
        let record = LinkRecord::new(" Site ", " Desc ", " example.com ", Some(" Tools "))
            .expect("valid record");
        assert_eq!(record.title(), "Site");
        assert_eq!(record.description(), "Desc");
        assert_eq!(record.url(), "http://example.com");
        assert_eq!(record.category(), "Tools");
        assert_eq!(record.icon(), None);
    }

    #[test]
    fn record_defaults_category() {
        let missing = LinkRecord::new("a", "", "a.io", None).unwrap();
        assert_eq!(missing.category(), UNCATEGORIZED);

        let blank = LinkRecord::new("a", "", "a.io", Some("   ")).unwrap();
        assert_eq!(blank.category(), UNCATEGORIZED);
    }

    #[test]
    fn record_requires_title_and_url() {
        assert!(LinkRecord::new("  ", "d", "a.io", None).is_none());
        assert!(LinkRecord::new("t", "d", " ", None).is_none());
    }

    #[test]
    fn record_icon_ignores_blank() {
        let record = LinkRecord::new("a", "", "a.io", None)
            .unwrap()
            .with_icon(Some("  "));
        assert_eq!(record.icon(), None);

        let record = record.with_icon(Some("🔧"));
        assert_eq!(record.icon(), Some("🔧"));
    }

    #[test]
    fn catalog_preserves_order() {
        let records = vec![
            LinkRecord::new("b", "", "b.io", None).unwrap(),
            LinkRecord::new("a", "", "a.io", None).unwrap(),
        ];
        let catalog = Catalog::new(records);
        let titles: Vec<_> = catalog.iter().map(LinkRecord::title).collect();
        assert_eq!(titles, ["b", "a"]);
        assert!(Catalog::empty().is_empty());
    }

    proptest! {
        #[test]
        fn prop_normalize_idempotent(raw in "[a-zA-Z0-9:/._-]{1,40}") {
            let once = normalize_url(&raw);
            prop_assert_eq!(normalize_url(&once), once.clone());
            prop_assert!(once.starts_with("http://") || once.starts_with("https://"));
        }
    }
}
