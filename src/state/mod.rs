//! Page-lifetime engine state

use crate::actions::PrefixKey;
use crate::config::Settings;
use crate::field_nav::FieldNavigator;
use crate::find::FindController;
use crate::key_hint::KeyHintPopup;
use crate::link_hints::LinkHintController;
use crate::scroll_mode::ScrollController;

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
        }
    }
}

/// Every piece of mutable engine state. Owned by the engine and lent to
/// controllers; reset on blur or disable, never rebuilt.
pub struct EngineState {
    pub mode: Mode,
    pub pending_prefix: Option<PrefixKey>,
    pub settings: Settings,
    pub key_hint: KeyHintPopup,
    pub fields: FieldNavigator,
    pub scroll: ScrollController,
    pub find: FindController,
    pub hints: LinkHintController,
}

impl EngineState {
    pub fn new(find: FindController) -> Self {
        Self {
            mode: Mode::Normal,
            pending_prefix: None,
            settings: Settings::default(),
            key_hint: KeyHintPopup::new(),
            fields: FieldNavigator::new(),
            scroll: ScrollController::new(),
            find,
            hints: LinkHintController::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }
}
