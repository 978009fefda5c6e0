//! The instant-search widget: config, index, engine and interaction wired
//! together.

use crate::config::SearchConfig;
use crate::engine::SearchEngine;
use crate::error::Result;
use crate::loader::fetch_documents;
use crate::render::{render_bucket, SearchOutcome};
use crate::results::ResultProcessor;
use crate::types::Document;
use crate::ui::{Effect, Interaction, UiEvent};

/// A search widget for one form on a page.
///
/// The widget is inert when its index failed to load: searches produce no
/// outcome and events produce no effects, so the page keeps working without
/// search.
pub struct SearchWidget {
  config: SearchConfig,
  engine: Option<SearchEngine>,
  interaction: Interaction,
}

impl SearchWidget {
  /// Fetches the index from `config.data_path` and builds the widget.
  ///
  /// A failed fetch is logged and yields an inert widget. It is not retried
  /// and nothing is shown to the user.
  pub async fn initialize(config: SearchConfig) -> Self {
    let engine = match fetch_documents(&config.data_path).await {
      Ok(documents) => match SearchEngine::from_config(&config, documents) {
        Ok(engine) => Some(engine),
        Err(error) => {
          tracing::error!(%error, "failed to build search engine");
          None
        }
      },
      Err(error) => {
        tracing::error!(%error, path = %config.data_path, "failed to load search index");
        None
      }
    };

    Self::with_engine(config, engine)
  }

  /// Builds a widget over documents that are already in memory.
  pub fn from_documents(config: SearchConfig, documents: Vec<Document>) -> Result<Self> {
    let engine = SearchEngine::from_config(&config, documents)?;
    Ok(Self::with_engine(config, Some(engine)))
  }

  fn with_engine(config: SearchConfig, engine: Option<SearchEngine>) -> Self {
    let interaction = Interaction::new(config.fullscreen);
    Self {
      config,
      engine,
      interaction,
    }
  }

  pub fn config(&self) -> &SearchConfig {
    &self.config
  }

  /// True when the index loaded and the widget responds to input.
  pub fn is_ready(&self) -> bool {
    self.engine.is_some()
  }

  pub fn interaction(&self) -> &Interaction {
    &self.interaction
  }

  /// Runs a search for `input` and post-processes the hits.
  ///
  /// Inputs whose length (in chars) is not greater than `min_input_length`
  /// return [`SearchOutcome::TypeMore`]; the empty input always does.
  /// Returns `None` when the widget is inert.
  pub fn search(&self, input: &str) -> Option<SearchOutcome> {
    let engine = self.engine.as_ref()?;

    if input.chars().count() <= self.config.min_input_length {
      return Some(SearchOutcome::TypeMore);
    }

    let hits = engine.search(input);
    if hits.is_empty() {
      return Some(SearchOutcome::NoResults);
    }

    let processor = ResultProcessor::new(&self.config, input);
    Some(SearchOutcome::Hits(processor.present_all(&hits)))
  }

  /// Feeds a host event to the widget and returns the effects to apply.
  ///
  /// Input events search first: the `Render` effect with the new result list
  /// comes before any modal change.
  pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
    if self.engine.is_none() {
      return Vec::new();
    }

    let mut effects = Vec::new();
    if let UiEvent::Input(value) = &event {
      if let Some(outcome) = self.search(value) {
        self.interaction.set_rows(outcome.row_urls());
        effects.push(Effect::Render(render_bucket(&outcome)));
      }
    }
    effects.extend(self.interaction.handle(event));
    effects
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn widget(config: SearchConfig) -> SearchWidget {
    let docs = vec![
      json!({"name": "Rust", "description": "hello world", "url": "/rust/"}),
      json!({"name": "Go", "description": "gophers", "url": "/go/"}),
    ];
    let docs = docs.into_iter().filter_map(|d| d.as_object().cloned()).collect();
    SearchWidget::from_documents(config, docs).unwrap()
  }

  #[test]
  fn test_empty_input_asks_for_more() {
    let w = widget(SearchConfig::default());
    assert_eq!(w.search(""), Some(SearchOutcome::TypeMore));
  }

  #[test]
  fn test_min_length_is_exclusive() {
    let w = widget(SearchConfig::builder().min_input_length(2).build().unwrap());
    assert_eq!(w.search("ru"), Some(SearchOutcome::TypeMore));
    assert!(matches!(w.search("rus"), Some(SearchOutcome::Hits(_))));
  }

  #[test]
  fn test_no_results() {
    let w = widget(SearchConfig::default());
    assert_eq!(w.search("zzzzzz"), Some(SearchOutcome::NoResults));
  }

  #[test]
  fn test_input_renders_before_opening() {
    let mut w = widget(SearchConfig::default());
    let effects = w.handle(UiEvent::Input("rust".into()));
    assert!(matches!(&effects[0], Effect::Render(html) if html.contains("<mark>Rust</mark>")));
    assert!(effects.contains(&Effect::ShowModal { fullscreen: false }));
  }
}
