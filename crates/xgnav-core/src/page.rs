//! Static page shell
//!
//! Wraps a rendered container in the complete document: head metadata from
//! the site config, the search box with its engine selector, the
//! result-count indicator and the footer.

use crate::config::SiteConfig;
use crate::render::{html_escape, RenderedView};
use std::fmt::Write as _;

const SEARCH_PLACEHOLDER: &str = "Search links or the web (Ctrl+K)";
const SEARCH_BUTTON: &str = "Search";

/// Render the complete static document around `view`
///
/// `stored_engine` is the visitor's remembered engine choice, if any.
#[must_use]
pub fn render_page(config: &SiteConfig, view: &RenderedView, stored_engine: Option<&str>) -> String {
    let title = html_escape(&config.site_title);
    let description = html_escape(&config.site_description);
    let query = view.query.as_deref().map(html_escape).unwrap_or_default();
    let count_class = if view.count.is_visible() {
        "search-results-count show"
    } else {
        "search-results-count"
    };

    let mut page = String::with_capacity(view.markup.len() + 2048);
    let _ = write!(
        page,
        r#"<!DOCTYPE html>
<html lang="zh-CN" data-theme="light">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<meta name="description" content="{description}">
<title>{title}</title>
<link rel="stylesheet" href="css/style.css">
</head>
<body>
<header><h1>{title}</h1><p class="site-description">{description}</p></header>
<form class="search-box" role="search">
{engines}<input id="search-input" type="search" autocomplete="off" placeholder="{SEARCH_PLACEHOLDER}" value="{query}">
<button id="search-button" type="submit">{SEARCH_BUTTON}</button>
</form>
<div id="search-results-count" class="{count_class}">{count}</div>
<main id="nav-container">{markup}</main>
<footer><small>{copyright}</small></footer>
</body>
</html>
"#,
        engines = engine_selector(config, stored_engine),
        count = view.count,
        markup = view.markup,
        copyright = config.copyright,
    );
    page
}

fn engine_selector(config: &SiteConfig, stored_engine: Option<&str>) -> String {
    if config.search_engines.is_empty() {
        return String::new();
    }

    let selected = config.selected_engine(stored_engine).map(|e| e.engine.as_str());
    let mut select = String::from(r#"<select id="search-engine-select">"#);
    for engine in &config.search_engines {
        let marker = if Some(engine.engine.as_str()) == selected {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            select,
            r#"<option value="{}" data-url="{}"{marker}>{}</option>"#,
            html_escape(&engine.engine),
            html_escape(&engine.url),
            html_escape(&engine.name),
        );
    }
    select.push_str("</select>\n");
    select
}
