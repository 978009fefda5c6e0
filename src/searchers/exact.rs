//! A `Searcher` that requires the whole query to appear verbatim.

use crate::searcher::{Query, Searcher, TextMatch};
use crate::searchers::tokenizer::find_all_ignore_case;
use crate::types::{MatchOptions, MatchRange, MatchStrategy};

/// Case-insensitive phrase matching.
///
/// The input is treated as one phrase, spaces and punctuation included, so
/// "rust web" matches "Rust Web Development" but not "web rust".
#[derive(Debug, Clone)]
pub struct ExactSearch {
  find_all_matches: bool,
}

impl Default for ExactSearch {
  fn default() -> Self {
    Self::new(MatchOptions::EXACT)
  }
}

impl ExactSearch {
  pub fn new(options: MatchOptions) -> Self {
    Self {
      find_all_matches: options.find_all_matches,
    }
  }
}

impl Searcher for ExactSearch {
  fn strategy(&self) -> MatchStrategy {
    MatchStrategy::Exact
  }

  fn match_text(&self, query: &Query, text: &str) -> Option<TextMatch> {
    if query.is_blank() {
      return None;
    }

    let haystack: Vec<char> = text.chars().collect();
    let len = query.chars.len();
    let mut starts = find_all_ignore_case(&haystack, &query.chars);
    if starts.is_empty() {
      return None;
    }
    if !self.find_all_matches {
      starts.truncate(1);
    }

    Some(TextMatch {
      similarity: 1.0,
      indices: starts
        .into_iter()
        .map(|start| MatchRange::new(start, start + len))
        .collect(),
    })
  }
}
