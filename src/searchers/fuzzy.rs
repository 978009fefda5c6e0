//! A `Searcher` implementation for fuzzy (approximate) string matching.

use crate::searcher::{Query, Searcher, TextMatch};
use crate::searchers::tokenizer::{find_all_ignore_case, tokenize_with_offsets};
use crate::types::{MatchOptions, MatchRange, MatchStrategy};
use strsim::jaro_winkler;

/// A searcher that performs fuzzy word matching using the Jaro-Winkler
/// similarity algorithm.
///
/// `FuzzySearch` tolerates typos and partial input. Both the query and the
/// field text are split into words. A field word that contains a query word
/// (so "sear" inside "searching") is a perfect match; otherwise the two words
/// are compared with Jaro-Winkler and must reach `1 - threshold`.
///
/// The similarity of a field is the mean of the best similarity found for
/// each query word, so every word of a multi-word query has to be found
/// somewhere in the field.
pub struct FuzzySearch {
  /// The minimum similarity required to consider a word a match, between
  /// 0.0 (anything) and 1.0 (exact).
  min_similarity: f64,
  /// Report every qualifying word instead of only the best one per term.
  find_all_matches: bool,
}

impl Default for FuzzySearch {
  fn default() -> Self {
    Self::new(MatchOptions::FUZZY)
  }
}

impl FuzzySearch {
  /// Creates a new `FuzzySearch` from a parameter bundle.
  pub fn new(options: MatchOptions) -> Self {
    Self {
      min_similarity: options.min_similarity(),
      find_all_matches: options.find_all_matches,
    }
  }

  /// Sets a custom minimum similarity.
  ///
  /// # Arguments
  ///
  /// * `similarity` - The desired minimum, from 0.0 to 1.0.
  pub fn with_min_similarity(mut self, similarity: f64) -> Self {
    self.min_similarity = similarity.clamp(0.0, 1.0);
    self
  }

  /// Best matches of one query term among the field words.
  fn match_term(
    &self,
    term: &str,
    chars: &[char],
    tokens: &[crate::searchers::tokenizer::Token],
  ) -> (f64, Vec<MatchRange>) {
    let term_chars: Vec<char> = term.chars().collect();
    let term_len = term_chars.len();
    let mut best = 0.0;
    let mut ranges = Vec::new();

    for token in tokens {
      let word = &chars[token.start..token.end];

      let (similarity, range) = match find_all_ignore_case(word, &term_chars).first() {
        Some(&offset) => (
          1.0,
          MatchRange::new(token.start + offset, token.start + offset + term_len),
        ),
        None => {
          // Skip if length difference is too large (>50% different)
          let doc_len = token.end - token.start;
          let len_diff = term_len.abs_diff(doc_len);
          let max_len = term_len.max(doc_len);
          if max_len > 0 && (len_diff * 2) > max_len {
            continue;
          }
          (
            jaro_winkler(term, &token.text),
            MatchRange::new(token.start, token.end),
          )
        }
      };

      if similarity < self.min_similarity {
        continue;
      }

      if self.find_all_matches {
        ranges.push(range);
        if similarity > best {
          best = similarity;
        }
      } else if similarity > best {
        best = similarity;
        ranges.clear();
        ranges.push(range);

        // A containing word cannot be beaten.
        if similarity >= 1.0 {
          break;
        }
      }
    }

    (best, ranges)
  }
}

impl Searcher for FuzzySearch {
  fn strategy(&self) -> MatchStrategy {
    MatchStrategy::Fuzzy
  }

  fn match_text(&self, query: &Query, text: &str) -> Option<TextMatch> {
    if query.terms.is_empty() {
      return None;
    }

    let chars: Vec<char> = text.chars().collect();
    let tokens = tokenize_with_offsets(text);
    if tokens.is_empty() {
      return None;
    }

    let mut total = 0.0;
    let mut indices = Vec::new();
    for term in &query.terms {
      let (similarity, ranges) = self.match_term(term, &chars, &tokens);
      total += similarity;
      indices.extend(ranges);
    }

    let similarity = total / query.terms.len() as f64;
    if indices.is_empty() || similarity < self.min_similarity {
      return None;
    }

    indices.sort_by_key(|r| (r.start, r.end));
    indices.dedup();

    Some(TextMatch {
      similarity,
      indices,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_prefix_inside_word_is_perfect() {
    let searcher = FuzzySearch::default();
    let m = searcher
      .match_text(&Query::new("sear"), "Building a Search Engine")
      .unwrap();
    assert_eq!(m.similarity, 1.0);
    assert_eq!(m.indices, vec![MatchRange::new(11, 15)]);
  }

  #[test]
  fn test_typo_tolerated() {
    let searcher = FuzzySearch::default();
    let m = searcher.match_text(&Query::new("progrmming"), "Rust programming").unwrap();
    assert!(m.similarity > 0.9);
    assert_eq!(m.indices, vec![MatchRange::new(5, 16)]);
  }

  #[test]
  fn test_unrelated_rejected() {
    let searcher = FuzzySearch::default();
    assert!(searcher.match_text(&Query::new("kubernetes"), "Rust programming").is_none());
    assert!(searcher.match_text(&Query::new("!!"), "Rust programming").is_none());
  }

  #[test]
  fn test_every_term_needed() {
    let searcher = FuzzySearch::default();
    assert!(searcher.match_text(&Query::new("rust zebra"), "Rust programming").is_none());
    assert!(searcher.match_text(&Query::new("rust prog"), "Rust programming").is_some());
  }

  #[test]
  fn test_find_all_reports_each_word() {
    let searcher = FuzzySearch::new(MatchOptions {
      find_all_matches: true,
      ..MatchOptions::FUZZY
    });
    let m = searcher.match_text(&Query::new("rust"), "rust, Rust and rusty").unwrap();
    assert_eq!(
      m.indices,
      vec![MatchRange::new(0, 4), MatchRange::new(6, 10), MatchRange::new(15, 19)]
    );
  }
}
