//! Structured (YAML) link data parser
//!
//! Accepts two document shapes:
//! - Category-keyed: `{ <category>: { <title>: <url> | {url, desc, icon} } }`
//! - Legacy: `{ links: [ {title, url, description, category}, ... ] }`
//!
//! Keys starting with `_` inside a category body are category metadata
//! (e.g. `_icon`) and are skipped.

use crate::error::ParseError;
use crate::model::LinkRecord;
use crate::parsers::{LinkParser, ParseOutcome};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

const FORMAT: &str = "yaml";

/// Default location of the structured data file
pub(crate) const DEFAULT_PATH: &str = "data/links.yml";

/// One entry of a category body
///
/// Either a bare URL string or an object carrying the URL and optional
/// description and icon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EntrySpec {
    /// `title: url`
    Shorthand(String),
    /// `title: { url, desc | description, icon }`
    Detailed {
        /// Target URL
        url: String,
        /// Description
        #[serde(default, alias = "description")]
        desc: Option<String>,
        /// Icon specifier
        #[serde(default)]
        icon: Option<String>,
    },
}

impl EntrySpec {
    /// Resolve into a normalized record
    #[must_use]
    pub fn into_record(self, title: &str, category: &str) -> Option<LinkRecord> {
        match self {
            Self::Shorthand(url) => LinkRecord::new(title, "", url, Some(category)),
            Self::Detailed { url, desc, icon } => {
                LinkRecord::new(title, desc.unwrap_or_default(), url, Some(category))
                    .map(|record| record.with_icon(icon.as_deref()))
            }
        }
    }
}

/// Item of the legacy `links:` list
#[derive(Debug, Deserialize)]
struct LegacyItem {
    #[serde(default, alias = "name")]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, alias = "desc")]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

impl LegacyItem {
    fn into_record(self) -> Option<LinkRecord> {
        LinkRecord::new(
            self.title?,
            self.description.unwrap_or_default(),
            self.url?,
            self.category.as_deref(),
        )
        .map(|record| record.with_icon(self.icon.as_deref()))
    }
}

/// YAML link parser
#[derive(Debug, Clone)]
pub struct StructuredParser {
    path: String,
}

impl Default for StructuredParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredParser {
    /// Create parser reading `data/links.yml`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_path(DEFAULT_PATH)
    }

    /// Create parser reading a custom path
    #[inline]
    #[must_use]
    pub fn with_path(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn first_document(content: &str) -> Result<Option<Value>, ParseError> {
        let Some(doc) = serde_yaml::Deserializer::from_str(content).next() else {
            return Ok(None);
        };
        let value = Value::deserialize(doc)
            .map_err(|e| ParseError::syntax_error(FORMAT, e.to_string()))?;
        Ok((!value.is_null()).then_some(value))
    }

    fn parse_legacy(items: &[Value]) -> Vec<LinkRecord> {
        items
            .iter()
            .filter_map(|item| match serde_yaml::from_value::<LegacyItem>(item.clone()) {
                Ok(item) => item.into_record(),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed legacy link item");
                    None
                }
            })
            .collect()
    }

    fn parse_categories(root: &Mapping) -> Vec<LinkRecord> {
        let mut records = Vec::new();
        for (key, body) in root {
            let Some(category) = scalar_label(key) else {
                tracing::debug!(?key, "skipping non-scalar category key");
                continue;
            };
            let Value::Mapping(entries) = body else {
                tracing::debug!(%category, "skipping category without entries");
                continue;
            };

            for (key, value) in entries {
                let Some(title) = scalar_label(key) else {
                    continue;
                };
                if title.starts_with('_') {
                    continue;
                }
                match serde_yaml::from_value::<EntrySpec>(value.clone()) {
                    Ok(entry) => records.extend(entry.into_record(&title, &category)),
                    Err(e) => {
                        tracing::debug!(%category, %title, error = %e, "skipping malformed entry");
                    }
                }
            }
        }
        records
    }
}

impl LinkParser for StructuredParser {
    fn format(&self) -> &'static str {
        FORMAT
    }

    fn source_path(&self) -> &str {
        &self.path
    }

    fn parse(&self, content: &str) -> ParseOutcome {
        let document = match Self::first_document(content) {
            Ok(Some(document)) => document,
            Ok(None) => return ParseOutcome::Empty,
            Err(e) => return ParseOutcome::Failed(e),
        };

        let Value::Mapping(root) = document else {
            return ParseOutcome::Failed(ParseError::malformed(
                FORMAT,
                "top level is not a mapping",
            ));
        };

        let records = match root.get("links") {
            Some(Value::Sequence(items)) => Self::parse_legacy(items),
            _ => Self::parse_categories(&root),
        };
        ParseOutcome::from_records(records)
    }
}

/// Render a scalar mapping key as text
fn scalar_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
