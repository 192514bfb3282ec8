use std::collections::HashSet;

/// English stop words dropped from queries and documents
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Marker that ends the useful part of a topic description
pub const SUMMARY_MARKER: &str = "<smry>";

/// Label leading every topic title
pub const TITLE_LABEL: &str = "Topic:";

/// Tokenize text into index terms (lowercase, split on non-alphanumerics, drop stop words)
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty() && !STOP_WORDS.contains(s))
        .map(|s| s.to_string())
        .collect()
}

/// Parse a query into its distinct terms, in order of first occurrence
pub fn parse_query(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize(query)
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

/// Strip the leading label from a topic title ("Topic: Foo" -> "Foo").
///
/// Only a leading `Topic:` label (any case) is removed, repeatedly, so the
/// result never starts with one. Other colons are query text.
pub fn clean_title(title: &str) -> String {
    let mut body = title.trim();
    while let Some(label) = body.get(..TITLE_LABEL.len()) {
        if !label.eq_ignore_ascii_case(TITLE_LABEL) {
            break;
        }
        body = body[TITLE_LABEL.len()..].trim_start();
    }
    body.trim_end().to_string()
}

/// Cut a topic description at the summary marker.
///
/// Without a marker the whole description is kept.
pub fn clean_description(description: &str) -> String {
    let body = match description.find(SUMMARY_MARKER) {
        Some(marker) => &description[..marker],
        None => description,
    };
    body.trim().to_string()
}
