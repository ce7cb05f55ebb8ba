//! Card renderer
//!
//! Turns a list of records into the markup of the navigation container.
//! Each call produces a complete replacement for the container; nothing is
//! patched incrementally.

use crate::config::{CardContent, SiteConfig};
use crate::grouping::group_by_category;
use crate::search::filter_links;
use std::fmt::{self, Write as _};
use xgnav_catalog::LinkRecord;

const NO_DATA_TITLE: &str = "No links yet";
const NO_DATA_HINT: &str = "The link list is empty.";
const NO_RESULTS_TITLE: &str = "No results";
const LOAD_FAILED_TITLE: &str = "⚠️ Failed to load";
const RETRY_LABEL: &str = "Retry";

/// Which state the container shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// Cards grouped by category
    Links {
        /// Number of cards
        shown: usize,
        /// Category names in display order
        categories: Vec<String>,
    },
    /// There is nothing to show at all
    NoData,
    /// The catalog has links but none match the query
    NoResults {
        /// Query as typed
        query: String,
    },
    /// Link data could not be loaded
    LoadFailed {
        /// Diagnostic shown to the visitor
        message: String,
    },
}

/// Result-count indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultCount {
    /// Records shown
    pub shown: usize,
    /// Records in the catalog
    pub total: usize,
}

impl ResultCount {
    /// Whether the indicator is visible (a subset is shown)
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shown != self.total
    }
}

impl fmt::Display for ResultCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_visible() {
            write!(f, "found {} of {} links", self.shown, self.total)
        } else {
            Ok(())
        }
    }
}

/// One full rendering of the navigation container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    /// Displayed state
    pub kind: ViewKind,
    /// Container markup
    pub markup: String,
    /// Result-count indicator
    pub count: ResultCount,
    /// Query the view was filtered with, if any
    pub query: Option<String>,
}

/// Renders records into card markup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Renderer {
    card_content: CardContent,
    show_favicon: bool,
}

impl Renderer {
    /// Create renderer
    #[inline]
    #[must_use]
    pub fn new(card_content: CardContent, show_favicon: bool) -> Self {
        Self {
            card_content,
            show_favicon,
        }
    }

    /// Create renderer from the display options of a config
    #[inline]
    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.card_content, config.show_favicon)
    }

    /// Render a list of records out of a catalog of `total`
    ///
    /// An empty list renders the "no data" state.
    #[must_use]
    pub fn render_links(&self, links: &[&LinkRecord], total: usize) -> RenderedView {
        if links.is_empty() {
            return self.render_no_data(total);
        }

        let groups = group_by_category(links.iter().copied());
        let mut markup = String::new();
        for group in &groups {
            let name = html_escape(group.name);
            let _ = write!(
                markup,
                r#"<section class="category" data-category="{name}"><h2 class="category-title">{name}</h2><div class="category-links">"#
            );
            for link in &group.links {
                self.write_card(&mut markup, link);
            }
            markup.push_str("</div></section>");
        }

        tracing::debug!(shown = links.len(), total, categories = groups.len(), "rendered links");
        RenderedView {
            kind: ViewKind::Links {
                shown: links.len(),
                categories: groups.iter().map(|g| g.name.to_string()).collect(),
            },
            markup,
            count: ResultCount {
                shown: links.len(),
                total,
            },
            query: None,
        }
    }

    /// Render the full catalog
    #[must_use]
    pub fn render_catalog(&self, catalog: &[LinkRecord]) -> RenderedView {
        let links: Vec<&LinkRecord> = catalog.iter().collect();
        self.render_links(&links, catalog.len())
    }

    /// Render the catalog filtered by `query`
    ///
    /// A blank query renders the full catalog. An empty catalog renders
    /// "no data"; a non-empty catalog without matches renders "no results"
    /// quoting the query.
    #[must_use]
    pub fn render_search(&self, catalog: &[LinkRecord], query: &str) -> RenderedView {
        if query.trim().is_empty() {
            return self.render_catalog(catalog);
        }

        let found = filter_links(catalog, query);
        let mut view = if found.is_empty() && !catalog.is_empty() {
            self.render_no_results(query, catalog.len())
        } else {
            self.render_links(&found, catalog.len())
        };
        tracing::debug!(query, shown = view.count.shown, "search rendered");
        view.query = Some(query.to_string());
        view
    }

    /// Render the "no data" state
    #[must_use]
    pub fn render_no_data(&self, total: usize) -> RenderedView {
        RenderedView {
            kind: ViewKind::NoData,
            markup: format!(
                r#"<div class="no-data"><h3>{NO_DATA_TITLE}</h3><p>{NO_DATA_HINT}</p></div>"#
            ),
            count: ResultCount { shown: 0, total },
            query: None,
        }
    }

    /// Render the "no results" state for `query`
    #[must_use]
    pub fn render_no_results(&self, query: &str, total: usize) -> RenderedView {
        RenderedView {
            kind: ViewKind::NoResults {
                query: query.to_string(),
            },
            markup: format!(
                r#"<div class="no-results"><h3>{NO_RESULTS_TITLE}</h3><p>No links contain "{}". Try another keyword.</p></div>"#,
                html_escape(query)
            ),
            count: ResultCount { shown: 0, total },
            query: Some(query.to_string()),
        }
    }

    /// Render the load failure state with a retry control
    #[must_use]
    pub fn render_failure(&self, message: &str) -> RenderedView {
        RenderedView {
            kind: ViewKind::LoadFailed {
                message: message.to_string(),
            },
            markup: format!(
                r#"<div class="error"><h3>{LOAD_FAILED_TITLE}</h3><p>{}</p><button type="button" class="retry" onclick="location.reload()">{RETRY_LABEL}</button></div>"#,
                html_escape(message)
            ),
            count: ResultCount { shown: 0, total: 0 },
            query: None,
        }
    }

    fn write_card(&self, out: &mut String, link: &LinkRecord) {
        let secondary = match self.card_content {
            CardContent::Description => link.description(),
            CardContent::Url => link.url(),
        };
        let icon = match link.icon() {
            Some(icon) if self.show_favicon => format!(r#" data-icon="{}""#, html_escape(icon)),
            _ => String::new(),
        };
        let _ = write!(
            out,
            r#"<a href="{url}" target="_blank" rel="noopener noreferrer" class="link-card"{icon}><h3>{title}</h3><p class="link-secondary">{secondary}</p></a>"#,
            url = html_escape(link.url()),
            title = html_escape(link.title()),
            secondary = html_escape(secondary),
        );
    }
}

/// Escape HTML special characters
#[must_use]
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Vec<LinkRecord> {
        vec![
            LinkRecord::new("Site", "Desc", "example.com", Some("Tools")).unwrap(),
            LinkRecord::new("Blog", "My blog", "blog.io", Some("Tools")).unwrap(),
            LinkRecord::new("Tool2", "-", "tool2.io", Some("Misc")).unwrap(),
        ]
    }

    #[test]
    fn card_markup() {
        let links = vec![LinkRecord::new("Blog", "My blog", "blog.io", Some("Tools")).unwrap()];
        let view = Renderer::default().render_catalog(&links);
        assert_eq!(
            view.markup,
            concat!(
                r#"<section class="category" data-category="Tools"><h2 class="category-title">Tools</h2><div class="category-links">"#,
                r#"<a href="http://blog.io" target="_blank" rel="noopener noreferrer" class="link-card"><h3>Blog</h3><p class="link-secondary">My blog</p></a>"#,
                "</div></section>"
            )
        );
        assert!(!view.count.is_visible());
        assert_eq!(view.count.to_string(), "");
    }

    #[test]
    fn categories_in_name_order() {
        let links: Vec<_> = ["b", "a", "c"]
            .iter()
            .map(|c| LinkRecord::new(format!("t{c}"), "", "x.io", Some(*c)).unwrap())
            .collect();
        let view = Renderer::default().render_catalog(&links);

        let a = view.markup.find(r#"data-category="a""#).unwrap();
        let b = view.markup.find(r#"data-category="b""#).unwrap();
        let c = view.markup.find(r#"data-category="c""#).unwrap();
        assert!(a < b && b < c);
        assert_eq!(
            view.kind,
            ViewKind::Links {
                shown: 3,
                categories: vec!["a".into(), "b".into(), "c".into()]
            }
        );
    }

    #[test]
    fn card_content_url_shows_normalized_url() {
        let renderer = Renderer::new(CardContent::Url, true);
        let view = renderer.render_catalog(&catalog()[..1]);
        assert!(view.markup.contains(r#"<p class="link-secondary">http://example.com</p>"#));
        assert!(!view.markup.contains("Desc"));
    }

    #[test]
    fn icon_only_when_enabled() {
        let links = vec![LinkRecord::new("A", "", "a.io", None)
            .unwrap()
            .with_icon(Some("🔧"))];
        let on = Renderer::new(CardContent::Description, true).render_catalog(&links);
        assert!(on.markup.contains(r#"data-icon="🔧""#));

        let off = Renderer::new(CardContent::Description, false).render_catalog(&links);
        assert!(!off.markup.contains("data-icon"));

        let config = SiteConfig::new().with_show_favicon(false);
        let from_config = Renderer::from_config(&config).render_catalog(&links);
        assert_eq!(from_config.markup, off.markup);
    }

    #[test]
    fn text_is_escaped() {
        let links = vec![LinkRecord::new("<b>x</b>", "a & b", "x.io/?q=\"1\"", Some("C")).unwrap()];
        let view = Renderer::default().render_catalog(&links);
        assert!(view.markup.contains("<h3>&lt;b&gt;x&lt;/b&gt;</h3>"));
        assert!(view.markup.contains("a &amp; b"));
        assert!(view.markup.contains("href=\"http://x.io/?q=&quot;1&quot;\""));
    }

    #[test]
    fn search_shows_single_match() {
        let links = catalog();
        let view = Renderer::default().render_search(&links, "blog");
        assert_eq!(
            view.kind,
            ViewKind::Links {
                shown: 1,
                categories: vec!["Tools".into()]
            }
        );
        assert_eq!(view.markup.matches("class=\"link-card\"").count(), 1);
        assert!(view.markup.contains("<h3>Blog</h3>"));
        assert_eq!(view.count.to_string(), "found 1 of 3 links");
        assert_eq!(view.query.as_deref(), Some("blog"));
    }

    #[test]
    fn blank_search_is_full_catalog() {
        let links = catalog();
        let view = Renderer::default().render_search(&links, "  ");
        assert_eq!(view.count, ResultCount { shown: 3, total: 3 });
        assert_eq!(view.query, None);
    }

    #[test]
    fn no_results_quotes_query() {
        let view = Renderer::default().render_search(&catalog(), "zzz<");
        assert_eq!(
            view.kind,
            ViewKind::NoResults {
                query: "zzz<".into()
            }
        );
        assert!(view.markup.contains("\"zzz&lt;\""));
        assert!(!view.markup.contains("no-data"));
        assert_eq!(view.count.to_string(), "found 0 of 3 links");
    }

    #[test]
    fn empty_catalog_is_no_data_even_when_searching() {
        let renderer = Renderer::default();
        for view in [
            renderer.render_catalog(&[]),
            renderer.render_search(&[], "blog"),
        ] {
            assert_eq!(view.kind, ViewKind::NoData);
            assert!(view.markup.contains("no-data"));
            assert!(!view.markup.contains("no-results"));
        }
    }

    #[test]
    fn failure_offers_retry() {
        let view = Renderer::default().render_failure("all 2 link sources failed");
        assert!(matches!(view.kind, ViewKind::LoadFailed { .. }));
        assert!(view.markup.contains("class=\"retry\""));
        assert!(view.markup.contains("all 2 link sources failed"));
    }

    #[test]
    fn escape_all_specials() {
        assert_eq!(html_escape(r#"<a href='x'>&"#), "&lt;a href=&#39;x&#39;&gt;&amp;");
    }
}
