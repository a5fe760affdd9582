use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::keyboard::{normalize_key, KeyEvent};

/// Keyboard shortcut that flips the global enabled switch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleShortcut {
    pub key: String,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
}

impl Default for ToggleShortcut {
    fn default() -> Self {
        Self {
            key: "e".to_string(),
            ctrl_key: false,
            alt_key: false,
            meta_key: true,
            shift_key: true, // Cmd+Shift+E
        }
    }
}

/// Unvalidated shortcut as it arrives from the settings collaborator
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShortcutCandidate {
    pub key: Option<String>,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
}

impl ToggleShortcut {
    /// Validate a candidate: key is trimmed and lowercased, must be non-empty,
    /// and at least one of ctrl/alt/meta is required
    pub fn normalize(candidate: &ShortcutCandidate) -> Result<Self, EngineError> {
        let key = candidate
            .key
            .as_deref()
            .map(|k| k.trim().to_lowercase())
            .unwrap_or_default();
        if key.is_empty() {
            return Err(EngineError::InvalidShortcut("missing key"));
        }
        if !candidate.ctrl_key && !candidate.alt_key && !candidate.meta_key {
            return Err(EngineError::InvalidShortcut(
                "requires ctrl, alt or meta",
            ));
        }
        Ok(Self {
            key,
            ctrl_key: candidate.ctrl_key,
            alt_key: candidate.alt_key,
            meta_key: candidate.meta_key,
            shift_key: candidate.shift_key,
        })
    }

    /// Check if the shortcut matches the given key event exactly
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let m = event.modifiers;
        normalize_key(event) == self.key
            && m.control == self.ctrl_key
            && m.alt == self.alt_key
            && m.meta == self.meta_key
            && m.shift == self.shift_key
    }
}

impl fmt::Display for ToggleShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.meta_key {
            parts.push("Command".to_string());
        }
        if self.ctrl_key {
            parts.push("Control".to_string());
        }
        if self.alt_key {
            parts.push("Option".to_string());
        }
        if self.shift_key {
            parts.push("Shift".to_string());
        }
        let mut chars = self.key.chars();
        let key = match chars.next() {
            Some(first) if self.key.chars().count() == 1 => first.to_uppercase().to_string(),
            Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        };
        parts.push(key);
        write!(f, "{}", parts.join("+"))
    }
}

/// Settings mirrored from the settings collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Global kill switch
    pub enabled: bool,
    pub toggle_shortcut: ToggleShortcut,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            toggle_shortcut: ToggleShortcut::default(),
        }
    }
}

/// Partial settings payload; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPayload {
    pub enabled: Option<bool>,
    pub toggle_shortcut: Option<ShortcutCandidate>,
}

impl Settings {
    /// Apply a payload. An invalid shortcut is rejected and the prior one kept.
    pub fn apply(&mut self, payload: &SettingsPayload) {
        if let Some(enabled) = payload.enabled {
            self.enabled = enabled;
        }
        if let Some(candidate) = &payload.toggle_shortcut {
            match ToggleShortcut::normalize(candidate) {
                Ok(shortcut) => self.toggle_shortcut = shortcut,
                Err(e) => log::warn!("Keeping toggle shortcut {}: {}", self.toggle_shortcut, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(key: &str, meta: bool) -> ShortcutCandidate {
        ShortcutCandidate {
            key: Some(key.to_string()),
            meta_key: meta,
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        let shortcut = ToggleShortcut::normalize(&candidate("  K ", true)).unwrap();
        assert_eq!(shortcut.key, "k");
        assert!(shortcut.meta_key);
    }

    #[test]
    fn test_normalize_rejects_missing_key_and_modifier() {
        assert!(ToggleShortcut::normalize(&candidate("   ", true)).is_err());
        assert!(ToggleShortcut::normalize(&candidate("k", false)).is_err());
        assert!(ToggleShortcut::normalize(&ShortcutCandidate::default()).is_err());
    }

    #[test]
    fn test_shift_alone_is_not_a_modifier() {
        let c = ShortcutCandidate {
            key: Some("k".to_string()),
            shift_key: true,
            ..Default::default()
        };
        assert!(ToggleShortcut::normalize(&c).is_err());
    }

    #[test]
    fn test_matches_requires_exact_modifiers() {
        let shortcut = ToggleShortcut::default();
        assert!(shortcut.matches(&KeyEvent::new("E").with_meta().with_shift()));
        assert!(!shortcut.matches(&KeyEvent::new("e").with_meta()));
        assert!(!shortcut.matches(&KeyEvent::new("e").with_meta().with_shift().with_ctrl()));
    }

    #[test]
    fn test_apply_keeps_prior_shortcut_on_invalid() {
        let mut settings = Settings::default();
        let payload: SettingsPayload = serde_json::from_str(
            r#"{"enabled": false, "toggleShortcut": {"key": "x", "shiftKey": true}}"#,
        )
        .unwrap();
        settings.apply(&payload);
        assert!(!settings.enabled);
        assert_eq!(settings.toggle_shortcut, ToggleShortcut::default());
    }

    #[test]
    fn test_apply_accepts_valid_shortcut() {
        let mut settings = Settings::default();
        let payload: SettingsPayload =
            serde_json::from_str(r#"{"toggleShortcut": {"key": "J", "ctrlKey": true}}"#).unwrap();
        settings.apply(&payload);
        assert!(settings.enabled);
        assert_eq!(settings.toggle_shortcut.key, "j");
        assert!(settings.toggle_shortcut.ctrl_key);
    }

    #[test]
    fn test_display() {
        assert_eq!(ToggleShortcut::default().to_string(), "Command+Shift+E");
    }
}
