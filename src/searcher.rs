//! The `Searcher` trait, which defines the interface for match strategies.

use crate::searchers::tokenizer::tokenize;
use crate::types::{MatchRange, MatchStrategy};

/// A query prepared once per keystroke and shared by every field comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  /// The raw input as typed.
  pub text: String,
  /// Lowercased words of the input.
  pub terms: Vec<String>,
  /// The input as chars, for phrase matching.
  pub chars: Vec<char>,
}

impl Query {
  pub fn new(text: impl Into<String>) -> Self {
    let text = text.into();
    Self {
      terms: tokenize(&text),
      chars: text.chars().collect(),
      text,
    }
  }

  /// True when the input has nothing a searcher could match on.
  pub fn is_blank(&self) -> bool {
    self.text.trim().is_empty()
  }
}

/// How well a query matched one text value.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatch {
  /// Similarity in `[0, 1]`.
  pub similarity: f64,
  /// Ordered, half-open char ranges of the matched occurrences.
  pub indices: Vec<MatchRange>,
}

/// A match strategy the engine can run.
///
/// A `Searcher` only compares a query with a single text value. The
/// `SearchEngine` walks documents and keys, applies weights and ranks the
/// results, so implementations stay small.
///
/// The `Send` and `Sync` bounds allow the engine to match documents in
/// parallel.
pub trait Searcher: Send + Sync {
  /// Returns the strategy this searcher implements.
  fn strategy(&self) -> MatchStrategy;

  /// Matches `query` against `text`.
  ///
  /// Returns `None` when nothing in `text` reaches the searcher's threshold.
  fn match_text(&self, query: &Query, text: &str) -> Option<TextMatch>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_query_prepare() {
    let query = Query::new("Hello World");
    assert_eq!(query.terms, vec!["hello", "world"]);
    assert_eq!(query.chars.len(), 11);
    assert!(!query.is_blank());
    assert!(Query::new("   ").is_blank());
  }
}
