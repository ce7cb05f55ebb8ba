//! Delimited-text link data parser
//!
//! One record per line: `title, description, url[, category]`.
//! Blank lines and lines starting with `#` are ignored.

use crate::model::LinkRecord;
use crate::parsers::{LinkParser, ParseOutcome};

const FORMAT: &str = "text";

/// Default location of the delimited data file
pub(crate) const DEFAULT_PATH: &str = "data/links.txt";

const COMMENT_MARKER: char = '#';
const BYTE_ORDER_MARK: char = '\u{feff}';
const FIELD_SEPARATOR: char = ',';

/// Comma-separated link parser
#[derive(Debug, Clone)]
pub struct DelimitedParser {
    path: String,
}

impl Default for DelimitedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DelimitedParser {
    /// Create parser reading `data/links.txt`
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

    /// Parse a single line
    ///
    /// Returns `None` for comments, blank lines, lines with fewer than
    /// three fields and lines whose title or url is empty.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<LinkRecord> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            return None;
        }

        let mut fields = line.split(FIELD_SEPARATOR);
        let title = fields.next()?;
        let description = fields.next()?;
        let url = fields.next()?;
        let category = fields.next();

        LinkRecord::new(title, description, url, category)
    }
}

impl LinkParser for DelimitedParser {
    fn format(&self) -> &'static str {
        FORMAT
    }

    fn source_path(&self) -> &str {
        &self.path
    }

    fn parse(&self, content: &str) -> ParseOutcome {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
        let records = content.lines().filter_map(Self::parse_line).collect();
        ParseOutcome::from_records(records)
    }
}
