//! In-page search filter
//!
//! Case-insensitive substring match over title, description, url and
//! category. Pure and order-preserving.

use xgnav_catalog::LinkRecord;

/// Trimmed, lower-cased query; `None` when nothing is left to match
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim();
    (!query.is_empty()).then(|| query.to_lowercase())
}

/// True when `needle` (already normalized) occurs in any searchable field
#[must_use]
pub fn matches(link: &LinkRecord, needle: &str) -> bool {
    link.text_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Records matching `query`, in input order
///
/// A blank query matches everything.
#[must_use]
pub fn filter_links<'a, I>(links: I, query: &str) -> Vec<&'a LinkRecord>
where
    I: IntoIterator<Item = &'a LinkRecord>,
{
    match normalize_query(query) {
        None => links.into_iter().collect(),
        Some(needle) => links
            .into_iter()
            .filter(|link| matches(link, &needle))
            .collect(),
    }
}
