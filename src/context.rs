//! Context provided to the engine's matching loop.

use crate::config::FieldWeight;
use crate::types::Document;

/// The documents and weighted keys a single search runs over.
pub struct SearchContext<'a> {
  /// The slice of documents to be searched.
  pub items: &'a [Document],
  /// The keys to search, in declaration order.
  pub keys: &'a [FieldWeight],
  /// Sum of all key weights, used to normalize scores.
  pub total_weight: f32,
}

impl<'a> SearchContext<'a> {
  /// Creates a new `SearchContext` over the given items and keys.
  pub fn new(items: &'a [Document], keys: &'a [FieldWeight]) -> Self {
    Self {
      items,
      keys,
      total_weight: keys.iter().map(|k| k.weight).sum(),
    }
  }

  /// The weight of `key` relative to all keys, in `[0, 1]`.
  pub fn normalized_weight(&self, key: &FieldWeight) -> f32 {
    if self.total_weight > 0.0 {
      key.weight / self.total_weight
    } else {
      0.0
    }
  }
}
