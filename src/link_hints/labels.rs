//! Hint label generation
//!
//! One letter each while the alphabet suffices, otherwise two-letter labels
//! from the alphabet's Cartesian product. Labels are never mixed in length,
//! so no label is a prefix of another.

/// Generate labels for `count` elements in enumeration order.
///
/// Returns fewer than `count` labels when two letters cannot cover them all.
pub fn generate_hints(count: usize, chars: &[char]) -> Vec<String> {
    if count == 0 || chars.is_empty() {
        return Vec::new();
    }

    if count <= chars.len() {
        return chars[..count].iter().map(|c| c.to_string()).collect();
    }

    let capacity = chars.len() * chars.len();
    if count > capacity {
        log::debug!("{} hintable elements, labelling the first {}", count, capacity);
    }

    let mut hints = Vec::with_capacity(count.min(capacity));
    'outer: for c1 in chars {
        for c2 in chars {
            if hints.len() >= count {
                break 'outer;
            }
            hints.push(format!("{}{}", c1, c2));
        }
    }
    hints
}

/// Check if a hint matches the typed input
///
/// - `Some(true)` exact match
/// - `Some(false)` partial match (keep waiting)
/// - `None` no match
pub fn match_hint(hint: &str, input: &str) -> Option<bool> {
    if hint == input {
        Some(true)
    } else if hint.starts_with(input) {
        Some(false)
    } else {
        None
    }
}

/// Indices of hints that match or partially match `input`
pub fn filter_by_prefix(hints: &[String], input: &str) -> Vec<usize> {
    hints
        .iter()
        .enumerate()
        .filter_map(|(i, hint)| match_hint(hint, input).map(|_| i))
        .collect()
}
