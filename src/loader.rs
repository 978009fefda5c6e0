//! One-shot loading of the static JSON index.

use crate::error::{Error, Result};
use crate::types::Document;
use serde_json::Value;

/// Fetches and parses the document index at `path`.
///
/// `http://` and `https://` paths are fetched with a single GET; a non-2xx
/// answer is an error. Any other path is read from the local filesystem.
/// There is no retry and no timeout.
pub async fn fetch_documents(path: &str) -> Result<Vec<Document>> {
  let body = if is_remote(path) {
    fetch_remote(path).await?
  } else {
    tokio::fs::read(path).await?
  };

  let documents = parse_documents(&body)?;
  tracing::info!(path, documents = documents.len(), "loaded search index");
  Ok(documents)
}

/// Parses an index body: a JSON array of objects.
pub fn parse_documents(body: &[u8]) -> Result<Vec<Document>> {
  let value: Value = serde_json::from_slice(body)?;
  let Value::Array(items) = value else {
    return Err(Error::InvalidIndex("expected a JSON array of documents".into()));
  };

  items
    .into_iter()
    .enumerate()
    .map(|(i, item)| match item {
      Value::Object(doc) => Ok(doc),
      other => Err(Error::InvalidIndex(format!(
        "entry {i} is not an object: {other}"
      ))),
    })
    .collect()
}

fn is_remote(path: &str) -> bool {
  path.starts_with("http://") || path.starts_with("https://")
}

#[cfg(feature = "http")]
async fn fetch_remote(url: &str) -> Result<Vec<u8>> {
  let response = reqwest::get(url).await?;
  let status = response.status();
  if !status.is_success() {
    return Err(Error::HttpStatus(status.as_u16()));
  }
  Ok(response.bytes().await?.to_vec())
}

#[cfg(not(feature = "http"))]
async fn fetch_remote(url: &str) -> Result<Vec<u8>> {
  Err(Error::HttpDisabled(url.to_string()))
}
