//! litesearch - A light, embeddable instant-search component for static sites.
//!
//! litesearch loads a pre-built JSON index once, matches every keystroke
//! against it with a fuzzy or exact strategy, and turns the hits into a
//! highlighted result list with contextual snippets. A small state machine
//! drives the dropdown: opening, closing and keyboard navigation between
//! rows.
//!
//! ```rust
//! use litesearch::prelude::*;
//! use serde_json::json;
//!
//! let docs = vec![json!({"name": "Getting Started with Rust", "url": "/rust/"})];
//! let docs: Vec<Document> = docs.into_iter().filter_map(|d| d.as_object().cloned()).collect();
//!
//! let mut widget = SearchWidget::from_documents(SearchConfig::default(), docs).unwrap();
//! let effects = widget.handle(UiEvent::Input("rust".into()));
//!
//! assert!(widget.interaction().is_open());
//! assert!(matches!(&effects[0], Effect::Render(html) if html.contains("<mark>Rust</mark>")));
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod loader;
pub mod render;
pub mod results;
pub mod searcher;
pub mod searchers;
pub mod types;
pub mod ui;
pub mod widget;

pub use error::{Error, Result};

pub mod prelude {
  //! Convenient re-exports for common types and traits.

  pub use crate::config::*;
  pub use crate::engine::*;
  pub use crate::error::{Error, Result};
  pub use crate::loader::fetch_documents;
  pub use crate::render::*;
  pub use crate::results::*;
  pub use crate::searcher::*;
  pub use crate::types::*;
  pub use crate::ui::*;
  pub use crate::widget::*;
}
