//! Post-processing of engine hits into display-ready records.
//!
//! The pipeline for one hit is:
//!
//! 1. resolve the display fields (`title`, `description`, `id`, `url`,
//!    `image`) from the document, honouring aliases;
//! 2. cut a context window around the first description match;
//! 3. escape and highlight the query in title and description;
//! 4. optionally split a `Section|Title` title into labelled spans.
//!
//! Highlighting runs on the already-cut snippet, so an occurrence that falls
//! outside the window is not marked even though the engine reported it.

use crate::config::{Alias, SearchConfig};
use crate::types::{field_text, Document, MatchRange, SearchHit};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::OnceLock;

const ELLIPSIS: &str = "...";

/// A resolved display field and the source field it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
  pub source: String,
  pub value: String,
}

/// Reads display field `target`, applying aliases.
///
/// The same-named source field is the default. A declared alias whose source
/// is present overrides it; with several aliases for one target the last
/// declared wins.
pub fn resolve_field(doc: &Document, target: &str, aliases: &[Alias]) -> Option<ResolvedField> {
  aliases
    .iter()
    .rev()
    .filter(|alias| alias.target == target)
    .find_map(|alias| {
      field_text(doc, &alias.source).map(|value| ResolvedField {
        source: alias.source.clone(),
        value,
      })
    })
    .or_else(|| {
      field_text(doc, target).map(|value| ResolvedField {
        source: target.to_string(),
        value,
      })
    })
}

/// Raw (unescaped, unhighlighted) display fields of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFields {
  pub title: Option<String>,
  pub description: Option<String>,
  pub id: Option<String>,
  pub url: Option<String>,
  pub image: Option<String>,
}

impl NormalizedFields {
  pub fn from_document(doc: &Document, aliases: &[Alias]) -> Self {
    let get = |target: &str| resolve_field(doc, target, aliases).map(|f| f.value);
    Self {
      title: get("title"),
      description: get("description"),
      id: get("id"),
      url: get("url"),
      image: get("image"),
    }
  }
}

/// Cuts a window of at most `max_len` chars around `range`.
///
/// The spare room `c = max_len - range.len()` is split around the match:
/// the start moves out by `ceil(c / 2)`, the end by `floor(c / 2)`, and both
/// are clamped to `[0, len - 1]`. The window is not re-balanced after clamping, so a match
/// near either end of `value` yields a shorter, lopsided window. A match
/// longer than `max_len` shrinks the window inwards instead.
pub fn capture_context(value: &str, range: MatchRange, max_len: usize) -> String {
  let chars: Vec<char> = value.chars().collect();
  if chars.is_empty() {
    return String::new();
  }

  let len = chars.len() as i64;
  let mut first = range.start as i64;
  let mut last = range.end as i64;
  let spare = max_len as i64 - (last - first);

  first -= (spare + 1).div_euclid(2);
  if first < 0 {
    first = 0;
  }
  last += spare.div_euclid(2);
  if last > len - 1 {
    last = len - 1;
  }
  let first = first.min(len) as usize;
  let last = last.max(0) as usize;

  if last <= first {
    return String::new();
  }
  chars[first..last].iter().collect()
}

/// Wraps a snippet with an ellipsis on both ends.
pub fn with_ellipsis(snippet: &str) -> String {
  format!("{ELLIPSIS}{snippet}{ELLIPSIS}")
}

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> Cow<'_, str> {
  if !text.contains(['&', '<', '>', '"', '\'']) {
    return Cow::Borrowed(text);
  }
  let mut out = String::with_capacity(text.len() + 16);
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  Cow::Owned(out)
}

/// Marks every case-insensitive occurrence of the query in a text.
///
/// The query is matched literally: regex metacharacters typed by the user
/// have no special meaning.
#[derive(Debug, Clone)]
pub struct Highlighter {
  pattern: Option<Regex>,
}

impl Highlighter {
  pub fn new(query: &str) -> Self {
    if query.is_empty() {
      return Self { pattern: None };
    }
    let pattern = RegexBuilder::new(&regex::escape(query))
      .case_insensitive(true)
      .build();
    match pattern {
      Ok(re) => Self { pattern: Some(re) },
      Err(e) => {
        tracing::warn!(error = %e, "query too large to highlight");
        Self { pattern: None }
      }
    }
  }

  /// Wraps each occurrence in `<mark>…</mark>` without touching the rest.
  pub fn highlight<'t>(&self, text: &'t str) -> Cow<'t, str> {
    match &self.pattern {
      Some(re) => re.replace_all(text, "<mark>$0</mark>"),
      None => Cow::Borrowed(text),
    }
  }

  /// Like [`highlight`](Self::highlight), but HTML-escapes the text around
  /// and inside the marks.
  pub fn highlight_escaped(&self, text: &str) -> String {
    let Some(re) = &self.pattern else {
      return escape_html(text).into_owned();
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in re.find_iter(text) {
      out.push_str(&escape_html(&text[last..m.start()]));
      out.push_str("<mark>");
      out.push_str(&escape_html(m.as_str()));
      out.push_str("</mark>");
      last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
  }
}

fn section_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"^(.*)\|(.*)$").expect("Invalid section regex"))
}

/// Splits `Section|Title` at the last `|` into `(section, title)`.
///
/// Returns `None` for titles without a separator.
pub fn split_section(title: &str) -> Option<(&str, &str)> {
  let caps = section_pattern().captures(title)?;
  Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Lays out already-rendered section and title HTML as labelled spans.
pub fn section_markup(section: &str, title: &str) -> String {
  format!(
    r#"<span class="section">{section}</span><span class="separator">|</span><span class="title">{title}</span>"#
  )
}

/// A hit ready to be rendered. `title` and `description` hold HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
  pub id: Option<String>,
  pub url: Option<String>,
  pub image: Option<String>,
  pub title: Option<String>,
  pub description: Option<String>,
}

/// Turns engine hits into display records.
pub struct ResultProcessor<'a> {
  config: &'a SearchConfig,
  highlighter: Highlighter,
}

impl<'a> ResultProcessor<'a> {
  /// Creates a processor for one query.
  pub fn new(config: &'a SearchConfig, query: &str) -> Self {
    Self {
      config,
      highlighter: Highlighter::new(query),
    }
  }

  /// Processes a single hit.
  pub fn present(&self, hit: &SearchHit) -> DisplayRecord {
    let doc = &hit.item;
    let aliases = &self.config.aliases;
    let fields = NormalizedFields::from_document(doc, aliases);

    let title = fields.title.map(|title| {
      let parts = split_section(&title).filter(|_| self.config.show_section_on_title);
      match parts {
        // Highlight each side on its own so a mark never spans the separator.
        Some((section, rest)) => section_markup(
          &self.highlighter.highlight_escaped(section),
          &self.highlighter.highlight_escaped(rest),
        ),
        None => self.highlighter.highlight_escaped(&title),
      }
    });

    let description = resolve_field(doc, "description", aliases).map(|field| {
      let text = match self.context_range(hit, &field) {
        Some(range) => with_ellipsis(&capture_context(
          &field.value,
          range,
          self.config.max_context_length,
        )),
        None => field.value,
      };
      self.highlighter.highlight_escaped(&text)
    });

    DisplayRecord {
      id: fields.id,
      url: fields.url,
      image: fields.image,
      title,
      description,
    }
  }

  /// Processes hits in order, keeping at most `max_results`.
  pub fn present_all(&self, hits: &[SearchHit]) -> Vec<DisplayRecord> {
    hits
      .iter()
      .take(self.config.max_results)
      .map(|hit| self.present(hit))
      .collect()
  }

  /// First match range on the field the description came from.
  fn context_range(&self, hit: &SearchHit, field: &ResolvedField) -> Option<MatchRange> {
    hit
      .matches
      .iter()
      .find(|m| m.key == field.source && m.ref_index.is_none() && m.value == field.value)
      .and_then(|m| m.first_range())
  }
}
