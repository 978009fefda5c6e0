use litesearch::prelude::*;
use serde_json::{json, Value};

fn docs(values: Vec<Value>) -> Vec<Document> {
  values
    .into_iter()
    .filter_map(|v| v.as_object().cloned())
    .collect()
}

fn sample_docs() -> Vec<Document> {
  docs(vec![
    json!({
      "id": 1,
      "name": "Getting Started with Rust",
      "description": "Rust is a systems programming language that runs blazingly fast.",
      "url": "/rust/",
      "tags": ["rust", "tutorial"],
    }),
    json!({
      "id": 2,
      "name": "Building a Search Engine",
      "description": "Learn how to build a search engine: indexing, ranking and query processing.",
      "url": "/search-engine/",
      "tags": ["search"],
    }),
    json!({
      "id": 3,
      "name": "Introduction to Machine Learning",
      "description": "Supervised learning, unsupervised learning and neural networks.",
      "url": "/ml/",
      "tags": ["ml", "ai"],
    }),
  ])
}

#[test]
fn test_empty_query_is_type_more_placeholder() {
  let widget = SearchWidget::from_documents(SearchConfig::default(), sample_docs()).unwrap();
  let outcome = widget.search("").unwrap();
  assert_eq!(outcome, SearchOutcome::TypeMore);
  assert_eq!(
    render_bucket(&outcome),
    r#"<li class="warning">Type more to search.</li>"#
  );
}

#[test]
fn test_short_inputs_never_return_matches() {
  let config = SearchConfig::builder().min_input_length(3).build().unwrap();
  let widget = SearchWidget::from_documents(config, sample_docs()).unwrap();
  for input in ["r", "ru", "rus"] {
    assert_eq!(widget.search(input), Some(SearchOutcome::TypeMore), "input {input:?}");
  }
  assert!(matches!(widget.search("rust"), Some(SearchOutcome::Hits(_))));
}

#[test]
fn test_fuzzy_ranks_by_weighted_field() {
  let widget = SearchWidget::from_documents(SearchConfig::default(), sample_docs()).unwrap();
  let outcome = widget.search("serch").unwrap();
  let records = outcome.records();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].url.as_deref(), Some("/search-engine/"));
  assert_eq!(records[0].id.as_deref(), Some("2"));
}

#[test]
fn test_exact_requires_the_phrase() {
  let config = SearchConfig::builder()
    .match_strategy(MatchStrategy::Exact)
    .build()
    .unwrap();
  let widget = SearchWidget::from_documents(config, sample_docs()).unwrap();

  assert_eq!(widget.search("serch"), Some(SearchOutcome::NoResults));
  let outcome = widget.search("search engine").unwrap();
  assert_eq!(outcome.records().len(), 1);
  assert_eq!(
    outcome.records()[0].title.as_deref(),
    Some("Building a <mark>Search Engine</mark>")
  );
}

#[test]
fn test_max_results_truncates() {
  let config = SearchConfig::builder().max_results(2).build().unwrap();
  let widget = SearchWidget::from_documents(config, sample_docs()).unwrap();
  // "learn" hits every description through the word "learning"/"Learn".
  let outcome = widget.search("learn").unwrap();
  assert_eq!(outcome.records().len(), 2);
}

#[test]
fn test_section_title_split() {
  let config = SearchConfig::builder().show_section_on_title(true).build().unwrap();
  let widget = SearchWidget::from_documents(
    config,
    docs(vec![json!({"title": "A|B", "description": "hello world"})]),
  )
  .unwrap();

  let outcome = widget.search("hello").unwrap();
  let record = &outcome.records()[0];
  assert_eq!(
    record.title.as_deref(),
    Some(r#"<span class="section">A</span><span class="separator">|</span><span class="title">B</span>"#)
  );
  assert_eq!(record.description.as_deref(), Some("...<mark>hello</mark> worl..."));
}

#[test]
fn test_alias_overrides_default_named_field() {
  let config = SearchConfig::builder()
    .key("headline", 1.0)
    .alias("headline", "title")
    .build()
    .unwrap();
  let widget = SearchWidget::from_documents(
    config,
    docs(vec![json!({"title": "Plain title", "headline": "Rust headline"})]),
  )
  .unwrap();

  let outcome = widget.search("rust").unwrap();
  assert_eq!(
    outcome.records()[0].title.as_deref(),
    Some("<mark>Rust</mark> headline")
  );
}

#[test]
fn test_highlight_limited_to_snippet() {
  let description = format!("rust {} rust", "x".repeat(100));
  let config = SearchConfig::builder()
    .key("description", 1.0)
    .max_context_length(20)
    .build()
    .unwrap();
  let widget = SearchWidget::from_documents(
    config,
    docs(vec![json!({"description": description})]),
  )
  .unwrap();

  let outcome = widget.search("rust").unwrap();
  let snippet = outcome.records()[0].description.clone().unwrap();
  assert_eq!(snippet, "...<mark>rust</mark> xxxxxxx...");
  assert_eq!(snippet.matches("<mark>").count(), 1);
}

#[test]
fn test_no_matches_without_match_reporting_keeps_description() {
  let config = SearchConfig::builder().include_matches(false).build().unwrap();
  let widget = SearchWidget::from_documents(config, sample_docs()).unwrap();
  let outcome = widget.search("neural").unwrap();
  assert_eq!(
    outcome.records()[0].description.as_deref(),
    Some("Supervised learning, unsupervised learning and <mark>neural</mark> networks.")
  );
}

#[test]
fn test_markup_is_escaped() {
  let widget = SearchWidget::from_documents(
    SearchConfig::default(),
    docs(vec![json!({
      "name": "<script>alert('rust')</script>",
      "url": "/x?a=1&b=2",
    })]),
  )
  .unwrap();

  let html = render_bucket(&widget.search("rust").unwrap());
  assert!(!html.contains("<script>"));
  assert!(html.contains("&lt;script&gt;alert(&#39;<mark>rust</mark>&#39;)&lt;/script&gt;"));
  assert!(html.contains(r#"href="/x?a=1&amp;b=2""#));
}
