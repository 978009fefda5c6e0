//! Widget configuration and the merge of caller options over defaults.

use crate::error::{Error, Result};
use crate::types::{MatchOptions, MatchStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A searchable key and how much it counts towards the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWeight {
  /// Source field name in the index documents.
  pub name: String,
  /// Relative weight (higher = more important).
  #[serde(default = "default_weight")]
  pub weight: f32,
}

fn default_weight() -> f32 {
  1.0
}

impl FieldWeight {
  pub fn new(name: impl Into<String>, weight: f32) -> Self {
    Self {
      name: name.into(),
      weight,
    }
  }
}

/// Remaps one source field onto one display field.
///
/// A site whose index calls the page title `name` declares
/// `Alias::new("name", "title")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
  pub source: String,
  pub target: String,
}

impl Alias {
  pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      target: target.into(),
    }
  }
}

/// Every option the widget understands.
///
/// Deserialization fills missing keys from [`SearchConfig::default`], so a
/// caller only spells out what it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
  /// Keys searched and their weights.
  pub keys: Vec<FieldWeight>,
  /// Source-to-display field remaps, applied after default field lookup.
  pub aliases: Vec<Alias>,
  /// Where the JSON index lives: a URL or a local path.
  pub data_path: String,
  /// CSS selector of the search form.
  pub form_selector: String,
  /// CSS selector of the text input, relative to the form.
  pub input_selector: String,
  /// CSS selector of the result list, relative to the form.
  pub results_selector: String,
  /// Inputs not longer than this show the "type more" placeholder.
  pub min_input_length: usize,
  pub match_strategy: MatchStrategy,
  pub max_results: usize,
  /// Upper bound (in chars) of a description snippet.
  pub max_context_length: usize,
  /// Keep per-field match locations on hits.
  pub include_matches: bool,
  /// Split `Section|Title` titles into labelled spans.
  pub show_section_on_title: bool,
  pub fullscreen: bool,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      keys: vec![
        FieldWeight::new("name", 7.0),
        FieldWeight::new("url", 5.0),
        FieldWeight::new("categories", 3.0),
        FieldWeight::new("tags", 3.0),
        FieldWeight::new("description", 1.0),
      ],
      aliases: vec![Alias::new("name", "title")],
      data_path: "/index.json".to_string(),
      form_selector: "#search".to_string(),
      input_selector: "input".to_string(),
      results_selector: "ul".to_string(),
      min_input_length: 0,
      match_strategy: MatchStrategy::Fuzzy,
      max_results: 10,
      max_context_length: 250,
      include_matches: true,
      show_section_on_title: false,
      fullscreen: false,
    }
  }
}

impl SearchConfig {
  /// Creates a new `SearchConfigBuilder` starting from the defaults.
  pub fn builder() -> SearchConfigBuilder {
    SearchConfigBuilder::default()
  }

  /// Merges a caller-supplied JSON object over the defaults.
  ///
  /// The merge is shallow: a key present in `overrides` replaces the whole
  /// default value, so passing `keys` replaces the entire weight list.
  pub fn merged(overrides: Value) -> Result<Self> {
    let overrides = match overrides {
      Value::Object(map) => map,
      Value::Null => serde_json::Map::new(),
      other => {
        return Err(Error::Config(format!(
          "options must be an object, got {other}"
        )))
      }
    };

    let Value::Object(mut base) = serde_json::to_value(Self::default())? else {
      return Err(Error::Config("defaults did not serialize to an object".into()));
    };
    for (key, value) in overrides {
      base.insert(key, value);
    }

    let config: Self = serde_json::from_value(Value::Object(base))?;
    config.validate()?;
    Ok(config)
  }

  /// Parses TOML options and merges them over the defaults.
  pub fn from_toml_str(source: &str) -> Result<Self> {
    let config: Self = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  /// Loads options from a `.toml` or `.json` file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
      Some("json") => Self::merged(serde_json::from_str(&source)?),
      _ => Self::from_toml_str(&source),
    }
  }

  /// The preset parameter bundle for the configured strategy.
  pub fn match_options(&self) -> MatchOptions {
    MatchOptions::for_strategy(self.match_strategy)
  }

  /// Checks values serde cannot reject on its own.
  pub fn validate(&self) -> Result<()> {
    if self.max_results == 0 {
      return Err(Error::Config("max_results must be at least 1".into()));
    }
    for key in &self.keys {
      if key.name.is_empty() {
        return Err(Error::Config("key names must not be empty".into()));
      }
      if !key.weight.is_finite() || key.weight <= 0.0 {
        return Err(Error::Config(format!(
          "weight of `{}` must be a positive number, got {}",
          key.name, key.weight
        )));
      }
    }
    for alias in &self.aliases {
      if alias.source.is_empty() || alias.target.is_empty() {
        return Err(Error::Config("aliases need a source and a target".into()));
      }
    }
    Ok(())
  }
}

/// Builder for [`SearchConfig`].
#[derive(Debug, Default)]
pub struct SearchConfigBuilder {
  config: SearchConfig,
  keys: Option<Vec<FieldWeight>>,
}

impl SearchConfigBuilder {
  /// Adds a searched key. The first call drops the default key list.
  pub fn key(mut self, name: impl Into<String>, weight: f32) -> Self {
    self
      .keys
      .get_or_insert_with(Vec::new)
      .push(FieldWeight::new(name, weight));
    self
  }

  /// Adds an alias on top of the defaults.
  pub fn alias(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
    self.config.aliases.push(Alias::new(source, target));
    self
  }

  /// Removes every alias, including the default `name → title`.
  pub fn no_aliases(mut self) -> Self {
    self.config.aliases.clear();
    self
  }

  pub fn data_path(mut self, path: impl Into<String>) -> Self {
    self.config.data_path = path.into();
    self
  }

  pub fn min_input_length(mut self, len: usize) -> Self {
    self.config.min_input_length = len;
    self
  }

  pub fn match_strategy(mut self, strategy: MatchStrategy) -> Self {
    self.config.match_strategy = strategy;
    self
  }

  pub fn max_results(mut self, max: usize) -> Self {
    self.config.max_results = max;
    self
  }

  pub fn max_context_length(mut self, len: usize) -> Self {
    self.config.max_context_length = len;
    self
  }

  pub fn include_matches(mut self, include: bool) -> Self {
    self.config.include_matches = include;
    self
  }

  pub fn show_section_on_title(mut self, show: bool) -> Self {
    self.config.show_section_on_title = show;
    self
  }

  pub fn fullscreen(mut self, fullscreen: bool) -> Self {
    self.config.fullscreen = fullscreen;
    self
  }

  /// Builds and validates the configuration.
  pub fn build(self) -> Result<SearchConfig> {
    let mut config = self.config;
    if let Some(keys) = self.keys {
      config.keys = keys;
    }
    config.validate()?;
    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_defaults() {
    let config = SearchConfig::default();
    assert_eq!(config.data_path, "/index.json");
    assert_eq!(config.form_selector, "#search");
    assert_eq!(config.min_input_length, 0);
    assert_eq!(config.match_strategy, MatchStrategy::Fuzzy);
    assert_eq!(config.max_results, 10);
    assert_eq!(config.max_context_length, 250);
    assert_eq!(config.keys[0], FieldWeight::new("name", 7.0));
  }

  #[test]
  fn test_merge_keeps_unspecified_defaults() {
    let config = SearchConfig::merged(json!({
      "match_strategy": "exact",
      "max_results": 3,
    }))
    .unwrap();
    assert_eq!(config.match_strategy, MatchStrategy::Exact);
    assert_eq!(config.max_results, 3);
    assert_eq!(config.max_context_length, 250);
    assert_eq!(config.keys.len(), 5);
  }

  #[test]
  fn test_merge_rejects_unknown_and_invalid() {
    assert!(SearchConfig::merged(json!({"colour": "red"})).is_err());
    assert!(SearchConfig::merged(json!({"max_results": 0})).is_err());
    assert!(SearchConfig::merged(json!([1, 2])).is_err());
    assert!(SearchConfig::merged(json!({"keys": [{"name": "title", "weight": -1.0}]})).is_err());
  }

  #[test]
  fn test_toml_partial() {
    let config = SearchConfig::from_toml_str(
      r#"
        min_input_length = 2
        show_section_on_title = true

        [[keys]]
        name = "title"
        weight = 2.0
      "#,
    )
    .unwrap();
    assert_eq!(config.min_input_length, 2);
    assert!(config.show_section_on_title);
    assert_eq!(config.keys, vec![FieldWeight::new("title", 2.0)]);
    assert_eq!(config.aliases, vec![Alias::new("name", "title")]);
  }

  #[test]
  fn test_builder_replaces_keys() {
    let config = SearchConfig::builder().key("title", 1.0).no_aliases().build().unwrap();
    assert_eq!(config.keys, vec![FieldWeight::new("title", 1.0)]);
    assert!(config.aliases.is_empty());
  }
}
