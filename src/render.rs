//! Rendering of search outcomes into result-list markup.

use crate::results::{escape_html, DisplayRecord};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Placeholder shown while the input is too short to search.
pub const TYPE_MORE: &str = "Type more to search.";
/// Placeholder shown when a search matched nothing.
pub const NO_RESULTS: &str = "No results found.";

/// What the result list should show for an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "results", rename_all = "snake_case")]
pub enum SearchOutcome {
  /// The input is not longer than the configured minimum.
  TypeMore,
  /// The input was searched and nothing matched.
  NoResults,
  /// Display-ready hits, best first.
  Hits(Vec<DisplayRecord>),
}

impl SearchOutcome {
  /// The hits, or an empty slice for the placeholders.
  pub fn records(&self) -> &[DisplayRecord] {
    match self {
      SearchOutcome::Hits(records) => records,
      _ => &[],
    }
  }

  /// URL of each rendered row, in row order.
  pub fn row_urls(&self) -> Vec<Option<String>> {
    self.records().iter().map(|r| r.url.clone()).collect()
  }
}

/// Renders the list items for an outcome.
///
/// Rows carry `role="option"` and a `tabindex` equal to their position so
/// keyboard navigation can move focus between them. Missing fields drop
/// their attribute or element instead of rendering an empty value.
pub fn render_bucket(outcome: &SearchOutcome) -> String {
  match outcome {
    SearchOutcome::TypeMore => warning(TYPE_MORE),
    SearchOutcome::NoResults => warning(NO_RESULTS),
    SearchOutcome::Hits(records) => {
      let mut bucket = String::new();
      for (index, record) in records.iter().enumerate() {
        render_row(&mut bucket, index, record);
      }
      bucket
    }
  }
}

fn warning(text: &str) -> String {
  format!(r#"<li class="warning">{text}</li>"#)
}

fn render_row(out: &mut String, index: usize, record: &DisplayRecord) {
  out.push_str(r#"<li role="option" aria-selected="false">"#);
  out.push_str("<a");
  if let Some(id) = &record.id {
    let _ = write!(out, r#" value="{}""#, escape_html(id));
  }
  if let Some(url) = &record.url {
    let _ = write!(out, r#" href="{}""#, escape_html(url));
  }
  let _ = write!(out, r#" tabindex="{index}">"#);

  if let Some(image) = &record.image {
    let _ = write!(out, r#"<img src="{}">"#, escape_html(image));
  }

  out.push_str(r#"<div class="meta">"#);
  if let Some(title) = &record.title {
    let _ = write!(out, "<p>{title}</p>");
  }
  if let Some(description) = &record.description {
    let _ = write!(out, "<p>{description}</p>");
  }
  out.push_str("</div></a></li>");
}
