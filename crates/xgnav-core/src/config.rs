//! Site configuration
//!
//! Read from `config.json` with the upper-case option names the page has
//! always used. Every option has a default, so a partial document only
//! overrides what it names and a missing document yields [`SiteConfig::default`].
//!
//! Options are applied one at a time: a null or mistyped value keeps that
//! option's default without discarding the rest of the document. Numeric
//! flags accept numbers, booleans and numeric strings.

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use xgnav_catalog::DataSource;

/// Location of the configuration document
pub const CONFIG_PATH: &str = "config.json";

const DEFAULT_TITLE: &str = "XG🧭导航";
const DEFAULT_DESCRIPTION: &str = "一个简洁、纯静态的个人导航站";
const DEFAULT_COPYRIGHT: &str =
    r#"© 2025 <a href="https://github.com/verkyer/xg-nav" target="_blank">XG-Nav</a>"#;

/// What the secondary line of a card shows (`CARD_CONTENT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "u8")]
pub enum CardContent {
    /// `0`: the link description
    #[default]
    Description,
    /// `1`: the link URL
    Url,
}

impl CardContent {
    /// `1` selects the URL; any other number the description
    #[must_use]
    pub fn from_number(value: f64) -> Self {
        if (value - 1.0).abs() < f64::EPSILON {
            Self::Url
        } else {
            Self::Description
        }
    }
}

impl From<CardContent> for u8 {
    fn from(value: CardContent) -> Self {
        match value {
            CardContent::Description => 0,
            CardContent::Url => 1,
        }
    }
}

/// Entry of the search-engine selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngine {
    /// Display name
    pub name: String,
    /// Identifier, matched against `DEFAULT_ENGINE`
    pub engine: String,
    /// Query URL prefix
    pub url: String,
}

/// Page configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SiteConfig {
    /// Document title and heading
    pub site_title: String,
    /// Subtitle and meta description
    pub site_description: String,
    /// Footer markup, trusted and inserted verbatim
    pub copyright: String,
    /// Card secondary line
    pub card_content: CardContent,
    /// Whether cards carry their icon specifier
    #[serde(serialize_with = "flag_to_number")]
    pub show_favicon: bool,
    /// Search-engine selector entries
    pub search_engines: Vec<SearchEngine>,
    /// Engine pre-selected when the visitor has no stored choice
    pub default_engine: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: DEFAULT_TITLE.to_string(),
            site_description: DEFAULT_DESCRIPTION.to_string(),
            copyright: DEFAULT_COPYRIGHT.to_string(),
            card_content: CardContent::Description,
            show_favicon: true,
            search_engines: Vec::new(),
            default_engine: None,
        }
    }
}

impl SiteConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration document
    ///
    /// # Errors
    /// `ConfigError::Invalid` if the text is not a JSON object. Individual
    /// options never fail the document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Ok(serde_json::from_str(text)?)
    }

    /// Apply recognised options over the defaults
    ///
    /// Unknown keys are ignored. A null option keeps its default; a value
    /// of the wrong shape does too and is logged.
    #[must_use]
    pub fn from_options(options: Map<String, Value>) -> Self {
        let mut config = Self::default();
        for (key, value) in options {
            if value.is_null() {
                continue;
            }
            let applied = match key.as_str() {
                "SITE_TITLE" => set(&mut config.site_title, text_option(&value)),
                "SITE_DESCRIPTION" => set(&mut config.site_description, text_option(&value)),
                "COPYRIGHT" => set(&mut config.copyright, text_option(&value)),
                "CARD_CONTENT" => set(
                    &mut config.card_content,
                    numeric_option(&value).map(CardContent::from_number),
                ),
                "SHOW_FAVICON" => set(
                    &mut config.show_favicon,
                    numeric_option(&value).map(|n| n.abs() > f64::EPSILON),
                ),
                "SEARCH_ENGINES" => set(&mut config.search_engines, engines_option(&value)),
                "DEFAULT_ENGINE" => set(&mut config.default_engine, text_option(&value).map(Some)),
                _ => true,
            };
            if !applied {
                tracing::warn!(option = %key, %value, "invalid configuration option, using default");
            }
        }
        config
    }

    /// Fetch and parse [`CONFIG_PATH`] from a source
    ///
    /// # Errors
    /// - `ConfigError::Unavailable` if the document cannot be fetched
    /// - `ConfigError::Invalid` if it cannot be parsed
    pub async fn load(source: &dyn DataSource) -> Result<Self, ConfigError> {
        let text = source.fetch(CONFIG_PATH).await?;
        Self::from_json(&text)
    }

    /// With site title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.site_title = title.into();
        self
    }

    /// With site description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.site_description = description.into();
        self
    }

    /// With footer markup
    #[inline]
    #[must_use]
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = copyright.into();
        self
    }

    /// With card secondary line
    #[inline]
    #[must_use]
    pub fn with_card_content(mut self, card_content: CardContent) -> Self {
        self.card_content = card_content;
        self
    }

    /// With icon specifiers on or off
    #[inline]
    #[must_use]
    pub fn with_show_favicon(mut self, show: bool) -> Self {
        self.show_favicon = show;
        self
    }

    /// With search engines and the default selection
    #[must_use]
    pub fn with_search_engines(
        mut self,
        engines: Vec<SearchEngine>,
        default_engine: Option<&str>,
    ) -> Self {
        self.search_engines = engines;
        self.default_engine = default_engine.map(str::to_string);
        self
    }

    /// Engine to pre-select
    ///
    /// A stored visitor choice wins when it names a configured engine,
    /// then `DEFAULT_ENGINE`, then the first configured engine.
    #[must_use]
    pub fn selected_engine(&self, stored: Option<&str>) -> Option<&SearchEngine> {
        let find = |id: &str| self.search_engines.iter().find(|e| e.engine == id);
        stored
            .and_then(find)
            .or_else(|| self.default_engine.as_deref().and_then(find))
            .or_else(|| self.search_engines.first())
    }
}

impl<'de> Deserialize<'de> for SiteConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::deserialize(deserializer).map(Self::from_options)
    }
}

fn set<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// Strings as-is; numbers and booleans in their JSON spelling
fn text_option(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numbers, booleans (`true` is 1) and numeric strings
fn numeric_option(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Engine list; malformed entries are dropped individually
fn engines_option(value: &Value) -> Option<Vec<SearchEngine>> {
    let Value::Array(items) = value else {
        return None;
    };
    let engines = items
        .iter()
        .filter_map(|item| match SearchEngine::deserialize(item) {
            Ok(engine) => Some(engine),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed search engine");
                None
            }
        })
        .collect();
    Some(engines)
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn flag_to_number<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xgnav_catalog::MemorySource;

    fn engines() -> Vec<SearchEngine> {
        ["bing", "google"]
            .iter()
            .map(|id| SearchEngine {
                name: id.to_uppercase(),
                engine: (*id).to_string(),
                url: format!("https://{id}.example/search?q="),
            })
            .collect()
    }

    #[test]
    fn defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.site_title, "XG🧭导航");
        assert_eq!(config.card_content, CardContent::Description);
        assert!(config.show_favicon);
        assert!(config.copyright.contains("XG-Nav"));
    }

    #[test]
    fn parses_recognised_options() {
        let config = SiteConfig::from_json(
            r#"{
                "SITE_TITLE": "My Nav",
                "SITE_DESCRIPTION": "links",
                "COPYRIGHT": "<b>me</b>",
                "CARD_CONTENT": 1,
                "SHOW_FAVICON": 0,
                "SEARCH_ENGINES": [
                    {"name": "Bing", "engine": "bing", "url": "https://bing.com/search?q="}
                ],
                "DEFAULT_ENGINE": "bing",
                "UNKNOWN": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.site_title, "My Nav");
        assert_eq!(config.copyright, "<b>me</b>");
        assert_eq!(config.card_content, CardContent::Url);
        assert!(!config.show_favicon);
        assert_eq!(config.search_engines.len(), 1);
        assert_eq!(config.default_engine.as_deref(), Some("bing"));
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config = SiteConfig::from_json(r#"{"SITE_TITLE": "Only title"}"#).unwrap();
        assert_eq!(config.site_title, "Only title");
        assert_eq!(config.site_description, SiteConfig::default().site_description);
    }

    #[test]
    fn unknown_card_content_shows_description() {
        let config = SiteConfig::from_json(r#"{"CARD_CONTENT": 7}"#).unwrap();
        assert_eq!(config.card_content, CardContent::Description);
    }

    #[test]
    fn flags_accept_bools_and_numeric_strings() {
        let config = SiteConfig::from_json(
            r#"{"SITE_TITLE": "Mine", "SHOW_FAVICON": false, "CARD_CONTENT": "1"}"#,
        )
        .unwrap();
        assert_eq!(config.site_title, "Mine");
        assert!(!config.show_favicon);
        assert_eq!(config.card_content, CardContent::Url);

        let config =
            SiteConfig::from_json(r#"{"SHOW_FAVICON": true, "CARD_CONTENT": 1.0}"#).unwrap();
        assert!(config.show_favicon);
        assert_eq!(config.card_content, CardContent::Url);

        let config = SiteConfig::from_json(r#"{"SHOW_FAVICON": " 0 "}"#).unwrap();
        assert!(!config.show_favicon);
    }

    #[test]
    fn out_of_range_card_content_shows_description() {
        let config =
            SiteConfig::from_json(r#"{"SITE_TITLE": "Mine", "CARD_CONTENT": 256}"#).unwrap();
        assert_eq!(config.site_title, "Mine");
        assert_eq!(config.card_content, CardContent::Description);
        assert_eq!(
            SiteConfig::from_json(r#"{"CARD_CONTENT": -1}"#).unwrap().card_content,
            CardContent::Description
        );
    }

    #[test]
    fn null_options_keep_defaults() {
        let config = SiteConfig::from_json(
            r#"{"SITE_TITLE": "Mine", "SITE_DESCRIPTION": null, "SHOW_FAVICON": null}"#,
        )
        .unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site_title, "Mine");
        assert_eq!(config.site_description, defaults.site_description);
        assert_eq!(config.show_favicon, defaults.show_favicon);
    }

    #[test]
    fn mistyped_options_keep_defaults_only_for_themselves() {
        let config = SiteConfig::from_json(
            r#"{
                "SITE_TITLE": "Mine",
                "COPYRIGHT": {"html": "x"},
                "CARD_CONTENT": "url",
                "SEARCH_ENGINES": "bing",
                "DEFAULT_ENGINE": ["bing"]
            }"#,
        )
        .unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site_title, "Mine");
        assert_eq!(config.copyright, defaults.copyright);
        assert_eq!(config.card_content, CardContent::Description);
        assert!(config.search_engines.is_empty());
        assert_eq!(config.default_engine, None);
    }

    #[test]
    fn malformed_engines_dropped_individually() {
        let config = SiteConfig::from_json(
            r#"{"SEARCH_ENGINES": [
                {"name": "Bing", "engine": "bing", "url": "https://bing.com/search?q="},
                {"name": "Broken"},
                42
            ]}"#,
        )
        .unwrap();
        assert_eq!(config.search_engines.len(), 1);
        assert_eq!(config.search_engines[0].engine, "bing");
    }

    #[test]
    fn numeric_title_kept_as_text() {
        let config = SiteConfig::from_json(r#"{"SITE_TITLE": 2025}"#).unwrap();
        assert_eq!(config.site_title, "2025");
    }

    #[test]
    fn byte_order_mark_tolerated() {
        let config = SiteConfig::from_json("\u{feff}{\"SITE_TITLE\": \"Mine\"}").unwrap();
        assert_eq!(config.site_title, "Mine");
    }

    #[test]
    fn non_object_document_is_an_error() {
        assert!(matches!(
            SiteConfig::from_json("[1, 2]"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn serialized_config_reads_back() {
        let config = SiteConfig::new()
            .with_title("Round")
            .with_card_content(CardContent::Url)
            .with_show_favicon(false)
            .with_search_engines(engines(), Some("google"));
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(SiteConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            SiteConfig::from_json("{ not json"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn serializes_back_to_option_names() {
        let json = serde_json::to_value(SiteConfig::default().with_card_content(CardContent::Url))
            .unwrap();
        assert_eq!(json["CARD_CONTENT"], 1);
        assert_eq!(json["SHOW_FAVICON"], 1);
    }

    #[test]
    fn engine_selection_precedence() {
        let config = SiteConfig::new().with_search_engines(engines(), Some("google"));
        assert_eq!(config.selected_engine(Some("bing")).unwrap().engine, "bing");
        assert_eq!(config.selected_engine(Some("gone")).unwrap().engine, "google");
        assert_eq!(config.selected_engine(None).unwrap().engine, "google");

        let no_default = SiteConfig::new().with_search_engines(engines(), None);
        assert_eq!(no_default.selected_engine(None).unwrap().engine, "bing");
        assert!(SiteConfig::new().selected_engine(None).is_none());
    }

    #[tokio::test]
    async fn load_from_source() {
        let source = MemorySource::new().with_document(CONFIG_PATH, r#"{"SITE_TITLE": "T"}"#);
        assert_eq!(SiteConfig::load(&source).await.unwrap().site_title, "T");

        let missing = SiteConfig::load(&MemorySource::new()).await;
        assert!(matches!(missing, Err(ConfigError::Unavailable(_))));
    }
}
