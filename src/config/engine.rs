//! Engine tunables
//!
//! Timing, limits and layout constants. Loaded from YAML so they can be
//! adjusted per installation; a missing or unreadable file means defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Default link-hint alphabet: home row
pub const DEFAULT_HINT_CHARS: &str = "asdfghjkl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Continuous scroll speed while j/k is held
    pub scroll_pixels_per_second: f64,
    /// Frame delta cap, absorbs stalls
    pub max_frame_delta_ms: f64,
    /// Frames without movement before the continuous loop gives up
    pub boundary_stall_frames: u32,
    /// Fallback completion for smooth discrete scrolls
    pub discrete_scroll_watchdog_ms: u64,
    pub find_debounce_ms: u64,
    pub find_match_limit: usize,
    /// Characters used for link-hint labels
    pub hint_chars: String,
    pub key_hint_min_width: f64,
    pub key_hint_max_width: f64,
    pub key_hint_viewport_margin: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scroll_pixels_per_second: 1200.0,
            max_frame_delta_ms: 50.0,
            boundary_stall_frames: 3,
            discrete_scroll_watchdog_ms: 800,
            find_debounce_ms: 80,
            find_match_limit: 2000,
            hint_chars: DEFAULT_HINT_CHARS.to_string(),
            key_hint_min_width: 260.0,
            key_hint_max_width: 640.0,
            key_hint_viewport_margin: 24.0,
        }
    }
}

impl EngineConfig {
    /// Get the path to the YAML config file
    pub fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("shelix").join("engine.yaml"))
    }

    /// Load config from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default engine config: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load and sanitize config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse and sanitize YAML config text
    pub fn from_yaml(contents: &str) -> Result<Self, EngineError> {
        let mut config: Self =
            serde_yml::from_str(contents).map_err(|e| EngineError::Config(e.to_string()))?;
        config.sanitize();
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::file_path().context("Could not determine config directory")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = serde_yml::to_string(self).context("Failed to serialize")?;
        std::fs::write(path, contents).context("Failed to write engine config")
    }

    /// Replace out-of-range values with defaults
    pub fn sanitize(&mut self) {
        let defaults = Self::default();

        let mut seen = Vec::new();
        for c in self.hint_chars.to_lowercase().chars() {
            if !c.is_whitespace() && !seen.contains(&c) {
                seen.push(c);
            }
        }
        if seen.len() < 2 {
            log::warn!("Hint alphabet '{}' too short, using default", self.hint_chars);
            self.hint_chars = defaults.hint_chars.clone();
        } else {
            self.hint_chars = seen.into_iter().collect();
        }

        if self.scroll_pixels_per_second <= 0.0 {
            self.scroll_pixels_per_second = defaults.scroll_pixels_per_second;
        }
        if self.max_frame_delta_ms <= 0.0 {
            self.max_frame_delta_ms = defaults.max_frame_delta_ms;
        }
        if self.boundary_stall_frames == 0 {
            self.boundary_stall_frames = defaults.boundary_stall_frames;
        }
        if self.discrete_scroll_watchdog_ms == 0 {
            self.discrete_scroll_watchdog_ms = defaults.discrete_scroll_watchdog_ms;
        }
        if self.find_match_limit == 0 {
            self.find_match_limit = defaults.find_match_limit;
        }
        if self.key_hint_min_width <= 0.0 || self.key_hint_max_width < self.key_hint_min_width {
            self.key_hint_min_width = defaults.key_hint_min_width;
            self.key_hint_max_width = defaults.key_hint_max_width;
        }
        if self.key_hint_viewport_margin < 0.0 {
            self.key_hint_viewport_margin = defaults.key_hint_viewport_margin;
        }
    }

    pub fn hint_alphabet(&self) -> Vec<char> {
        self.hint_chars.chars().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let mut config: EngineConfig = serde_yml::from_str("find_debounce_ms: 120\n").unwrap();
        config.sanitize();
        assert_eq!(config.find_debounce_ms, 120);
        assert_eq!(config.find_match_limit, 2000);
        assert_eq!(config.hint_chars, "asdfghjkl");
    }

    #[test]
    fn test_malformed_yaml_is_a_config_error() {
        let err = EngineConfig::from_yaml("find_debounce_ms: [fast]\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));

        let config = EngineConfig::from_yaml("hint_chars: \"qq\"\n").unwrap();
        assert_eq!(config.hint_chars, "asdfghjkl");
    }

    #[test]
    fn test_sanitize_dedupes_alphabet() {
        let mut config = EngineConfig {
            hint_chars: "AasSd".to_string(),
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.hint_chars, "asd");
    }

    #[test]
    fn test_sanitize_rejects_degenerate_values() {
        let mut config = EngineConfig {
            hint_chars: "a".to_string(),
            boundary_stall_frames: 0,
            find_match_limit: 0,
            key_hint_min_width: 700.0,
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("shelix-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("engine.yaml");
        let config = EngineConfig {
            scroll_pixels_per_second: 900.0,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        let loaded = EngineConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let path = std::env::temp_dir().join("shelix-does-not-exist.yaml");
        assert!(EngineConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_load_from_keeps_config_error_as_source() {
        let dir = std::env::temp_dir().join(format!("shelix-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("engine.yaml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "scroll_pixels_per_second: {}\n").unwrap();
        let err = EngineConfig::load_from(&path).unwrap_err();
        assert!(err.downcast_ref::<EngineError>().is_some());
        let _ = std::fs::remove_dir_all(dir);
    }
}
