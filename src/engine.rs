//! The search engine that runs a match strategy over the loaded index.

use crate::config::{FieldWeight, SearchConfig};
use crate::context::SearchContext;
use crate::error::Result;
use crate::searcher::{Query, Searcher};
use crate::types::{scalar_text, Document, FieldMatch, MatchOptions, MatchStrategy, SearchHit};
use serde_json::Value;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The in-memory index plus the searcher that queries it.
///
/// `SearchEngine` owns the documents fetched at startup. It hands each
/// `(query, field value)` pair to its [`Searcher`], combines the per-field
/// similarities with the configured key weights and ranks the documents.
///
/// Create a `SearchEngine` using the [`SearchEngineBuilder`] or
/// [`SearchEngine::from_config`].
///
/// # Examples
///
/// ```rust
/// use litesearch::prelude::*;
/// use serde_json::json;
///
/// let docs = vec![
///     json!({"name": "Getting Started with Rust", "url": "/rust/"}),
///     json!({"name": "Cooking pasta", "url": "/pasta/"}),
/// ];
/// let docs: Vec<Document> = docs.into_iter().filter_map(|d| d.as_object().cloned()).collect();
///
/// let engine = SearchEngine::from_config(&SearchConfig::default(), docs).unwrap();
/// let hits = engine.search("rust");
///
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].ref_index, 0);
/// ```
pub struct SearchEngine {
  /// The loaded index.
  documents: Vec<Document>,
  /// The strategy used to compare a query with a field value.
  searcher: Box<dyn Searcher>,
  /// Keys searched and their weights.
  keys: Vec<FieldWeight>,
  /// Keep per-field match locations on hits.
  include_matches: bool,
}

impl SearchEngine {
  /// Creates a new `SearchEngineBuilder` to construct an engine.
  pub fn builder() -> SearchEngineBuilder {
    SearchEngineBuilder::new()
  }

  /// Builds an engine with the searcher and keys described by `config`.
  pub fn from_config(config: &SearchConfig, documents: Vec<Document>) -> Result<Self> {
    let searcher = crate::searchers::for_strategy(config.match_strategy, config.match_options())?;
    Self::builder()
      .documents(documents)
      .searcher(searcher)
      .keys(config.keys.clone())
      .include_matches(config.include_matches)
      .build()
  }

  /// The strategy the engine runs with.
  pub fn strategy(&self) -> MatchStrategy {
    self.searcher.strategy()
  }

  /// Number of loaded documents.
  pub fn len(&self) -> usize {
    self.documents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }

  /// Searches every document and returns the hits ranked by score.
  ///
  /// Scores are `Σ weight · similarity / Σ weight` over the configured keys.
  /// Ties keep index order. An input without any searchable content returns
  /// no hits.
  pub fn search(&self, input: &str) -> Vec<SearchHit> {
    let query = Query::new(input);
    if query.is_blank() || self.keys.is_empty() {
      return Vec::new();
    }

    let context = SearchContext::new(&self.documents, &self.keys);

    #[cfg(feature = "parallel")]
    let mut hits: Vec<SearchHit> = context
      .items
      .par_iter()
      .enumerate()
      .filter_map(|(index, doc)| self.match_document(&context, &query, index, doc))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let mut hits: Vec<SearchHit> = context
      .items
      .iter()
      .enumerate()
      .filter_map(|(index, doc)| self.match_document(&context, &query, index, doc))
      .collect();

    sort_hits(&mut hits);

    tracing::debug!(
      query = %query.text,
      strategy = %self.strategy(),
      hits = hits.len(),
      "search complete"
    );

    hits
  }

  /// Match a single document against the query.
  fn match_document(
    &self,
    context: &SearchContext<'_>,
    query: &Query,
    index: usize,
    doc: &Document,
  ) -> Option<SearchHit> {
    let mut score = 0.0;
    let mut matches = Vec::new();

    for key in context.keys {
      let Some(value) = doc.get(&key.name) else {
        continue;
      };

      let similarity = match value {
        Value::Array(elements) => {
          let mut best = 0.0_f64;
          for (i, element) in elements.iter().enumerate() {
            let Some(text) = scalar_text(element) else {
              continue;
            };
            if let Some(m) = self.searcher.match_text(query, &text) {
              best = best.max(m.similarity);
              matches.push(FieldMatch {
                key: key.name.clone(),
                value: text,
                indices: m.indices,
                ref_index: Some(i),
              });
            }
          }
          best
        }
        scalar => {
          let Some(text) = scalar_text(scalar) else {
            continue;
          };
          match self.searcher.match_text(query, &text) {
            Some(m) => {
              matches.push(FieldMatch {
                key: key.name.clone(),
                value: text,
                indices: m.indices,
                ref_index: None,
              });
              m.similarity
            }
            None => 0.0,
          }
        }
      };

      score += context.normalized_weight(key) * similarity as f32;
    }

    if matches.is_empty() {
      return None;
    }

    let mut hit = SearchHit::new(doc.clone(), score, index);
    if self.include_matches {
      hit.matches = matches;
    }
    Some(hit)
  }
}

/// Sort hits by score, best first. The sort is stable so ties keep index order.
#[cfg(feature = "parallel")]
fn sort_hits(hits: &mut [SearchHit]) {
  hits.par_sort_by(|a, b| {
    b.score
      .partial_cmp(&a.score)
      .unwrap_or(std::cmp::Ordering::Equal)
  });
}

/// Sort hits by score, best first. The sort is stable so ties keep index order.
#[cfg(not(feature = "parallel"))]
fn sort_hits(hits: &mut [SearchHit]) {
  hits.sort_by(|a, b| {
    b.score
      .partial_cmp(&a.score)
      .unwrap_or(std::cmp::Ordering::Equal)
  });
}

/// A builder for creating `SearchEngine` instances.
pub struct SearchEngineBuilder {
  documents: Vec<Document>,
  searcher: Option<Box<dyn Searcher>>,
  keys: Vec<FieldWeight>,
  include_matches: bool,
}

impl Default for SearchEngineBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl SearchEngineBuilder {
  /// Creates a new, empty `SearchEngineBuilder`.
  pub fn new() -> Self {
    Self {
      documents: Vec::new(),
      searcher: None,
      keys: Vec::new(),
      include_matches: true,
    }
  }

  /// Sets the documents to search.
  pub fn documents(mut self, documents: Vec<Document>) -> Self {
    self.documents = documents;
    self
  }

  /// Sets the searcher. Defaults to the fuzzy preset.
  pub fn searcher(mut self, searcher: Box<dyn Searcher>) -> Self {
    self.searcher = Some(searcher);
    self
  }

  /// Adds a searched key.
  pub fn key(mut self, name: impl Into<String>, weight: f32) -> Self {
    self.keys.push(FieldWeight::new(name, weight));
    self
  }

  /// Replaces the searched keys.
  pub fn keys(mut self, keys: Vec<FieldWeight>) -> Self {
    self.keys = keys;
    self
  }

  /// Keep per-field match locations on hits (on by default).
  pub fn include_matches(mut self, include: bool) -> Self {
    self.include_matches = include;
    self
  }

  /// Builds the `SearchEngine` with the configured components.
  ///
  /// Without an explicit searcher the fuzzy preset is used, which fails when
  /// the `fuzzy` feature is compiled out.
  pub fn build(self) -> Result<SearchEngine> {
    let searcher = match self.searcher {
      Some(searcher) => searcher,
      None => crate::searchers::for_strategy(MatchStrategy::Fuzzy, MatchOptions::FUZZY)?,
    };
    Ok(SearchEngine {
      documents: self.documents,
      searcher,
      keys: self.keys,
      include_matches: self.include_matches,
    })
  }
}
