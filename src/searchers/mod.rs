//! The built-in `Searcher` implementations.
//!
//! Each match strategy of the widget maps to one searcher:
//!
//! - [`FuzzySearch`](crate::searchers::FuzzySearch): word-level, typo tolerant.
//! - [`ExactSearch`](crate::searchers::ExactSearch): the whole input as one phrase.
//!
//! # Example
//!
//! ```rust
//! use litesearch::prelude::*;
//! use litesearch::searchers::FuzzySearch;
//!
//! let searcher = FuzzySearch::default();
//! let m = searcher.match_text(&Query::new("serch"), "Building a Search Engine");
//! assert!(m.is_some());
//! ```

/// Implements a phrase searcher.
#[cfg(feature = "exact")]
pub mod exact;
/// Implements a fuzzy (approximate) word searcher.
#[cfg(feature = "fuzzy")]
pub mod fuzzy;
/// Provides text tokenization utilities for searchers.
pub mod tokenizer;

#[cfg(feature = "exact")]
pub use exact::ExactSearch;
#[cfg(feature = "fuzzy")]
pub use fuzzy::FuzzySearch;

use crate::error::{Error, Result};
use crate::searcher::Searcher;
use crate::types::{MatchOptions, MatchStrategy};

/// Builds the searcher a strategy calls for.
pub fn for_strategy(strategy: MatchStrategy, options: MatchOptions) -> Result<Box<dyn Searcher>> {
  match strategy {
    #[cfg(feature = "fuzzy")]
    MatchStrategy::Fuzzy => Ok(Box::new(FuzzySearch::new(options))),
    #[cfg(feature = "exact")]
    MatchStrategy::Exact => Ok(Box::new(ExactSearch::new(options))),
    #[allow(unreachable_patterns)]
    other => {
      let _ = options;
      Err(Error::StrategyUnavailable(other.as_str()))
    }
  }
}
