use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref TERM_RE: Regex = Regex::new(r"[A-Za-z0-9_]+").expect("valid regex");
    static ref DEFAULT_STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "the", "a", "an", "and", "or", "of", "to", "in", "is", "it", "for", "on", "this",
            "that",
        ];
        words.iter().copied().collect()
    };
}

/// The built-in stopword set: just enough to keep super-common junk out of the index.
pub fn default_stopwords() -> HashSet<String> {
    DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect()
}

/// Tokenize text into alphanumeric-plus-underscore terms of length >= 2.
///
/// Lowercases when `lowercase` is set (the default everywhere in this crate).
/// Stopwords are NOT removed here; the scorer relies on the unfiltered stream.
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let owned;
    let text = if lowercase {
        owned = text.to_lowercase();
        &owned
    } else {
        text
    };
    TERM_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|t| t.len() >= 2)
        .collect()
}

/// `tokenize` followed by stopword removal. Used at index build and query time so
/// both sides see the exact same terms.
pub fn tokenize_filtered(text: &str, lowercase: bool, stopwords: &HashSet<String>) -> Vec<String> {
    tokenize(text, lowercase)
        .into_iter()
        .filter(|t| !stopwords.contains(t))
        .collect()
}
