//! Text tokenization utilities.

use unicode_segmentation::UnicodeSegmentation;

/// A lowercased word and where it sits in the source text, in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub text: String,
  pub start: usize,
  pub end: usize,
}

/// Tokenize text into lowercased words.
pub fn tokenize(text: &str) -> Vec<String> {
  text
    .unicode_words()
    .map(|word| word.to_lowercase())
    .collect()
}

/// Tokenize text into words, keeping char offsets into `text`.
pub fn tokenize_with_offsets(text: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut chars_seen = 0;
  let mut bytes_seen = 0;

  for (byte_start, word) in text.unicode_word_indices() {
    chars_seen += text[bytes_seen..byte_start].chars().count();
    let len = word.chars().count();
    tokens.push(Token {
      text: word.to_lowercase(),
      start: chars_seen,
      end: chars_seen + len,
    });
    chars_seen += len;
    bytes_seen = byte_start + word.len();
  }

  tokens
}

/// Case-insensitive char equality that keeps positions aligned.
///
/// Lowercasing a whole string can change its length ("İ" becomes two chars),
/// so comparisons go char by char.
pub fn chars_eq_ignore_case(a: char, b: char) -> bool {
  a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Every char position where `needle` occurs in `haystack`, ignoring case.
///
/// Occurrences do not overlap.
pub fn find_all_ignore_case(haystack: &[char], needle: &[char]) -> Vec<usize> {
  let mut found = Vec::new();
  if needle.is_empty() || needle.len() > haystack.len() {
    return found;
  }

  let mut i = 0;
  while i + needle.len() <= haystack.len() {
    let hit = haystack[i..i + needle.len()]
      .iter()
      .zip(needle)
      .all(|(&a, &b)| chars_eq_ignore_case(a, b));
    if hit {
      found.push(i);
      i += needle.len();
    } else {
      i += 1;
    }
  }

  found
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_tokenize() {
    let text = "Hello, World! This is a test.";
    let tokens = tokenize(text);
    assert_eq!(tokens, vec!["hello", "world", "this", "is", "a", "test"]);
  }

  #[test]
  fn test_offsets_are_char_based() {
    let tokens = tokenize_with_offsets("Ünïcode wörds");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text, "ünïcode");
    assert_eq!((tokens[0].start, tokens[0].end), (0, 7));
    assert_eq!(tokens[1].text, "wörds");
    assert_eq!((tokens[1].start, tokens[1].end), (8, 13));
  }

  #[test]
  fn test_find_all_ignore_case() {
    let hay: Vec<char> = "Rust and rust and RUST".chars().collect();
    let needle: Vec<char> = "rust".chars().collect();
    assert_eq!(find_all_ignore_case(&hay, &needle), vec![0, 9, 18]);
    assert!(find_all_ignore_case(&hay, &[]).is_empty());
  }
}
