use litesearch::prelude::*;
use proptest::prelude::*;

/// A text with a match range that leaves at least `max_len` chars of
/// slack on both sides.
fn padded_match() -> impl Strategy<Value = (String, MatchRange, usize)> {
  (1usize..60, 0usize..40, 0usize..40, "[a-zé ]{1,30}").prop_flat_map(
    |(max_len, left_extra, right_extra, needle)| {
      let needle_len = needle.chars().count();
      let left = max_len + left_extra;
      let right = max_len + right_extra;
      Just((
        format!("{}{}{}", "l".repeat(left), needle, "r".repeat(right)),
        MatchRange::new(left, left + needle_len),
        max_len,
      ))
    },
  )
}

proptest! {
  #[test]
  fn prop_context_never_exceeds_max_len((value, range, max_len) in padded_match()) {
    let snippet = capture_context(&value, range, max_len);
    prop_assert!(snippet.chars().count() <= max_len);
  }

  #[test]
  fn prop_context_is_a_substring(
    value in "[a-z ]{0,80}",
    start in 0usize..80,
    len in 0usize..20,
    max_len in 0usize..120,
  ) {
    let chars = value.chars().count();
    let start = start.min(chars);
    let end = (start + len).min(chars);
    let snippet = capture_context(&value, MatchRange::new(start, end), max_len);
    prop_assert!(value.contains(&snippet));
  }

  #[test]
  fn prop_highlight_without_occurrence_is_identity(text in "[a-m .,]{0,60}", query in "[n-z]{1,8}") {
    let highlighter = Highlighter::new(&query);
    prop_assert_eq!(highlighter.highlight(&text), text.as_str());
    prop_assert_eq!(highlighter.highlight_escaped(&text), text);
  }

  #[test]
  fn prop_highlight_marks_every_occurrence(prefix in "[a-m ]{0,20}", query in "[n-z]{1,6}", suffix in "[a-m ]{0,20}") {
    let text = format!("{prefix}{}{suffix}{query}", query.to_uppercase());
    let marked = Highlighter::new(&query).highlight(&text).into_owned();
    prop_assert_eq!(marked.matches("<mark>").count(), 2);
    let plain = marked.replace("<mark>", "").replace("</mark>", "");
    prop_assert_eq!(plain, text);
  }

  #[test]
  fn prop_short_input_is_always_type_more(input in "[a-z]{0,5}", extra in 0usize..4) {
    let min = input.chars().count() + extra;
    let docs: Vec<Document> = vec![serde_json::json!({"name": input.clone()})]
      .into_iter()
      .filter_map(|d| d.as_object().cloned())
      .collect();
    let config = SearchConfig::builder().min_input_length(min).build().unwrap();
    let widget = SearchWidget::from_documents(config, docs).unwrap();
    prop_assert_eq!(widget.search(&input), Some(SearchOutcome::TypeMore));
  }
}
