//! XG-Nav Core - page pipeline
//!
//! Takes the catalog produced by `xgnav-catalog` and turns it into the
//! navigation page:
//! - Groups links by category
//! - Renders cards, empty states and the page shell
//! - Filters by free-text query, debounced per keystroke
//! - Owns configuration and catalog in a single controller
//!
//! # Example
//!
//! ```rust,ignore
//! use xgnav_catalog::FsSource;
//! use xgnav_core::Navigator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut navigator = Navigator::new();
//! navigator.load(&FsSource::new("site")).await.into_result()?;
//!
//! let view = navigator.search("blog");
//! println!("{}", view.count);
//! navigator.write_page("site/index.html", None).await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

// Core modules
pub mod config;
pub mod debounce;
pub mod error;
pub mod grouping;
pub mod navigator;
pub mod observability;
pub mod page;
pub mod render;
pub mod search;
pub mod session;

// Re-exports for convenience
pub use config::{CardContent, SearchEngine, SiteConfig, CONFIG_PATH};
pub use debounce::{Debouncer, DEFAULT_DELAY};
pub use error::{ConfigError, NavError, NavResult};
pub use grouping::{group_by_category, CategoryGroup};
pub use navigator::{CatalogState, CatalogSummary, LoadReport, Navigator, PageView};
pub use observability::{init_logging, LogFormat};
pub use page::render_page;
pub use render::{html_escape, RenderedView, Renderer, ResultCount, ViewKind};
pub use search::{filter_links, normalize_query};
pub use session::SearchSession;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with XG-Nav core
    pub use crate::{
        CardContent, Navigator, RenderedView, Renderer, SearchSession, SiteConfig, ViewKind,
    };
    pub use xgnav_catalog::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
