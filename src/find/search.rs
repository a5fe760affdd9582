use crate::dom::{Document, NodeId, TextRange};

/// Matches found for one query
#[derive(Debug, Default, PartialEq)]
pub struct SearchResult {
    pub ranges: Vec<TextRange>,
    /// Stopped at the match limit
    pub truncated: bool,
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Case-insensitive, non-overlapping occurrences of `query` in `text`,
/// as byte ranges
pub fn find_in_text(text: &str, query: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = query.chars().map(fold).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let hay: Vec<(usize, char)> = text.char_indices().map(|(i, c)| (i, fold(c))).collect();
    let mut found = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        let matched = hay[i..i + needle.len()]
            .iter()
            .zip(&needle)
            .all(|((_, h), n)| h == n);
        if matched {
            let start = hay[i].0;
            let end = hay.get(i + needle.len()).map(|(b, _)| *b).unwrap_or(text.len());
            found.push((start, end));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    found
}

/// Search the given text nodes in order, stopping at `limit` matches
pub fn search(doc: &Document, nodes: &[NodeId], query: &str, limit: usize) -> SearchResult {
    let mut result = SearchResult::default();
    for &node in nodes {
        let Some(text) = doc.text(node) else {
            continue;
        };
        for (start, end) in find_in_text(text, query) {
            result.ranges.push(TextRange { node, start, end });
            if result.ranges.len() >= limit {
                result.truncated = true;
                return result;
            }
        }
    }
    result
}
