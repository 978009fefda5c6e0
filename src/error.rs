//! Error types for litesearch.

use thiserror::Error;

/// Result type alias for litesearch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the widget or loading its index.
///
/// Searching, post-processing and the interaction state machine never fail;
/// only startup has an error path.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
  /// The index endpoint answered with a non-2xx status.
  #[error("HTTP error {0}")]
  HttpStatus(u16),

  /// The request could not be sent or the body could not be read.
  #[cfg(feature = "http")]
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),

  /// Reading a local index or config file failed.
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// The body was not valid JSON.
  #[error("invalid JSON: {0}")]
  Json(#[from] serde_json::Error),

  /// The body parsed but is not an array of objects.
  #[error("invalid index: {0}")]
  InvalidIndex(String),

  /// A TOML config file could not be parsed.
  #[error("invalid config file: {0}")]
  Toml(#[from] toml::de::Error),

  /// The configuration parsed but holds an unusable value.
  #[error("invalid config: {0}")]
  Config(String),

  /// The requested match strategy was compiled out.
  #[error("match strategy `{0}` is not enabled in this build")]
  StrategyUnavailable(&'static str),

  /// A `http(s)://` data path was given but the `http` feature is disabled.
  #[error("fetching `{0}` requires the `http` feature")]
  HttpDisabled(String),
}
