//! Core data types for litesearch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record of the static index: an arbitrary JSON object.
///
/// Documents carry whatever fields the site generator emitted (`title` or
/// `name`, `description`, `url`, `tags`, ...). Nothing is required; the
/// post-processor fills missing display fields with `None`.
pub type Document = Map<String, Value>;

/// A half-open range of char positions `[start, end)` inside a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRange {
  pub start: usize,
  pub end: usize,
}

impl MatchRange {
  pub fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }

  /// Number of chars covered by the range.
  pub fn len(&self) -> usize {
    self.end.saturating_sub(self.start)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Where the query occurred inside one field of a document.
///
/// For array-valued fields (`tags`, `categories`) each matching element gets
/// its own `FieldMatch`, with `ref_index` pointing at the element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
  /// The source field name, e.g. `"description"`.
  pub key: String,
  /// The unmodified field value the indices refer to.
  pub value: String,
  /// Ordered, half-open char ranges where the query matched.
  pub indices: Vec<MatchRange>,
  /// Position of the element inside an array-valued field.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ref_index: Option<usize>,
}

impl FieldMatch {
  /// The first matched range, if any.
  pub fn first_range(&self) -> Option<MatchRange> {
    self.indices.first().copied()
  }
}

/// A document matched by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
  /// The matched document.
  pub item: Document,
  /// Weighted similarity in `[0, 1]`; higher is better.
  pub score: f32,
  /// Position of the document in the loaded index.
  pub ref_index: usize,
  /// Per-field match locations. Empty when match reporting is disabled.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub matches: Vec<FieldMatch>,
}

impl SearchHit {
  pub fn new(item: Document, score: f32, ref_index: usize) -> Self {
    Self {
      item,
      score,
      ref_index,
      matches: Vec::new(),
    }
  }

  /// Returns the first match recorded for `key`.
  pub fn match_for(&self, key: &str) -> Option<&FieldMatch> {
    self.matches.iter().find(|m| m.key == key)
  }
}

/// The matching behaviour the widget runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
  /// Approximate, word-level matching tolerant to typos.
  #[default]
  Fuzzy,
  /// The whole query must occur verbatim (case-insensitive).
  Exact,
}

impl MatchStrategy {
  pub fn as_str(&self) -> &'static str {
    match self {
      MatchStrategy::Fuzzy => "fuzzy",
      MatchStrategy::Exact => "exact",
    }
  }
}

impl std::fmt::Display for MatchStrategy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for MatchStrategy {
  type Err = crate::error::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "fuzzy" => Ok(MatchStrategy::Fuzzy),
      "exact" => Ok(MatchStrategy::Exact),
      other => Err(crate::error::Error::Config(format!(
        "unknown match strategy `{other}`"
      ))),
    }
  }
}

/// The parameter bundle a strategy selects.
///
/// `threshold` follows the usual fuzzy-search convention: `0.0` demands a
/// perfect match, `1.0` accepts anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
  pub threshold: f64,
  /// Report every qualifying occurrence instead of only the best one.
  pub find_all_matches: bool,
  /// Treat the whole query as a single phrase.
  pub extended: bool,
}

impl MatchOptions {
  /// Preset used for `MatchStrategy::Fuzzy`.
  pub const FUZZY: MatchOptions = MatchOptions {
    threshold: 0.3,
    find_all_matches: false,
    extended: false,
  };

  /// Preset used for `MatchStrategy::Exact`.
  pub const EXACT: MatchOptions = MatchOptions {
    threshold: 0.0,
    find_all_matches: true,
    extended: true,
  };

  pub fn for_strategy(strategy: MatchStrategy) -> Self {
    match strategy {
      MatchStrategy::Fuzzy => Self::FUZZY,
      MatchStrategy::Exact => Self::EXACT,
    }
  }

  /// Minimum similarity a word must reach to count as a match.
  pub fn min_similarity(&self) -> f64 {
    (1.0 - self.threshold).clamp(0.0, 1.0)
  }
}

/// Reads a field as display text. See [`scalar_text`].
pub fn field_text(doc: &Document, field: &str) -> Option<String> {
  scalar_text(doc.get(field)?)
}

/// Strings are taken as-is, numbers and booleans are stringified, everything
/// else is `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_strategy_presets() {
    assert_eq!(MatchOptions::for_strategy(MatchStrategy::Exact).threshold, 0.0);
    assert!(MatchOptions::EXACT.find_all_matches);
    assert!(!MatchOptions::FUZZY.extended);
    assert!((MatchOptions::FUZZY.min_similarity() - 0.7).abs() < 1e-9);
  }

  #[test]
  fn test_strategy_parse() {
    assert_eq!("Exact".parse::<MatchStrategy>().unwrap(), MatchStrategy::Exact);
    assert!("regex".parse::<MatchStrategy>().is_err());
  }

  #[test]
  fn test_field_text() {
    let doc = json!({"id": 42, "draft": false, "title": "Hi", "tags": ["a"]});
    let doc = doc.as_object().unwrap();
    assert_eq!(field_text(doc, "id").as_deref(), Some("42"));
    assert_eq!(field_text(doc, "draft").as_deref(), Some("false"));
    assert_eq!(field_text(doc, "title").as_deref(), Some("Hi"));
    assert_eq!(field_text(doc, "tags"), None);
    assert_eq!(field_text(doc, "missing"), None);
  }

  #[test]
  fn test_scalar_text() {
    assert_eq!(scalar_text(&json!(1.5)).as_deref(), Some("1.5"));
    assert_eq!(scalar_text(&json!(true)).as_deref(), Some("true"));
    assert_eq!(scalar_text(&json!(null)), None);
    assert_eq!(scalar_text(&json!({"a": 1})), None);
  }
}
