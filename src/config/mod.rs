mod engine;
mod settings;

pub use engine::{EngineConfig, DEFAULT_HINT_CHARS};
pub use settings::{Settings, SettingsPayload, ShortcutCandidate, ToggleShortcut};
