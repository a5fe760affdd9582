//! Key normalization: raw key events to canonical tokens

pub mod keycode;

pub use keycode::{KeyEvent, Modifiers, NamedKey};

/// Canonical lowercase token for the physical key (`"j"`, `"enter"`, `" "`)
pub fn normalize_key(event: &KeyEvent) -> String {
    event.key.to_lowercase()
}

/// Token used for action lookup. Shift is folded in for single letters only,
/// so `N` becomes `shift+n` while `?` stays `?`.
pub fn action_key(event: &KeyEvent) -> String {
    let key = normalize_key(event);
    if event.modifiers.shift && is_single_letter(&key) {
        return format!("shift+{}", key);
    }
    key
}

fn is_single_letter(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_lowercase())
}

/// Display label for a key token in popups
pub fn format_key_label(token: &str) -> String {
    NamedKey::from_token(token)
        .map(|k| k.label().to_string())
        .unwrap_or_else(|| token.to_string())
}

/// Whether the token names a bare modifier key press
pub fn is_modifier_key(token: &str) -> bool {
    NamedKey::from_token(token)
        .map(|k| k.is_modifier())
        .unwrap_or(false)
}

/// Single printable character, the only kind of key link hints accept
pub fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => Some(c),
        _ => None,
    }
}
