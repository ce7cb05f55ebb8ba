//! Testing utilities for XG-Nav workspace
//!
//! Shared fixtures: sample data documents, in-memory and on-disk sites,
//! and navigators loaded from them.

#![allow(missing_docs)]

use std::path::Path;
use tempfile::TempDir;
use xgnav_catalog::{Catalog, LinkRecord, MemorySource};
use xgnav_core::{Navigator, SiteConfig, CONFIG_PATH};

pub const YAML_PATH: &str = "data/links.yml";
pub const TEXT_PATH: &str = "data/links.txt";

/// Three links in two categories, delimited form
pub const SAMPLE_TEXT: &str = "\
# name,description,url,category
Site,Desc,example.com,Tools
Blog,My blog,blog.io,Tools
Tool2,-,tool2.io,Misc
";

/// Structured form covering shorthand, detailed and metadata entries
pub const SAMPLE_YAML: &str = "\
Search:
  _icon: magnifier
  Google: https://www.google.com
  Bing:
    url: bing.com
    desc: Microsoft search
Dev:
  GitHub:
    url: https://github.com
    description: Code hosting
    icon: https://github.com/favicon.ico
";

/// Older structured form with a top-level `links` list
pub const SAMPLE_LEGACY_YAML: &str = "\
links:
  - name: Docs
    url: docs.rs
    desc: Crate docs
    category: Rust
  - title: Crates
    url: crates.io
  - name: Broken
";

pub const SAMPLE_CONFIG: &str = r#"{
  "SITE_TITLE": "Test Nav",
  "SITE_DESCRIPTION": "Fixture site",
  "COPYRIGHT": "© Tests",
  "CARD_CONTENT": 0,
  "SHOW_FAVICON": 1
}"#;

/// In-memory site with the delimited sample and no config
pub fn text_site() -> MemorySource {
    MemorySource::new().with_document(TEXT_PATH, SAMPLE_TEXT)
}

/// In-memory site with config, structured and delimited data
pub fn full_site() -> MemorySource {
    MemorySource::new()
        .with_document(CONFIG_PATH, SAMPLE_CONFIG)
        .with_document(YAML_PATH, SAMPLE_YAML)
        .with_document(TEXT_PATH, SAMPLE_TEXT)
}

/// Write `files` (relative path, content) under a fresh temp directory
pub fn site_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in files {
        write_file(dir.path(), path, content);
    }
    dir
}

pub fn write_file(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(full, content).unwrap();
}

pub fn link(title: &str, desc: &str, url: &str, category: Option<&str>) -> LinkRecord {
    LinkRecord::new(title, desc, url, category).unwrap()
}

/// Catalog equivalent to [`SAMPLE_TEXT`]
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        link("Site", "Desc", "example.com", Some("Tools")),
        link("Blog", "My blog", "blog.io", Some("Tools")),
        link("Tool2", "-", "tool2.io", Some("Misc")),
    ])
}

pub fn sample_navigator(config: SiteConfig) -> Navigator {
    Navigator::from_parts(config, sample_catalog())
}

/// Navigator loaded through the full ingestion path; panics if no catalog
pub async fn loaded_navigator(source: &MemorySource) -> Navigator {
    let mut navigator = Navigator::new();
    navigator.load(source).await.into_result().unwrap();
    navigator
}
