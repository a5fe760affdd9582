//! Global toggle shortcut and Ctrl chords

use super::KeyResult;
use crate::actions::ctrl_chord;
use crate::dom::query::is_editable_target;
use crate::dom::NodeId;
use crate::engine::Engine;
use crate::keyboard::{normalize_key, KeyEvent};
use crate::state::Mode;

/// The enable/disable shortcut. Checked before anything else so it also
/// works while the engine is disabled.
pub(super) fn check_toggle_shortcut(engine: &mut Engine, event: &KeyEvent) -> Option<KeyResult> {
    if !engine.state.settings.toggle_shortcut.matches(event) {
        return None;
    }
    let enabled = !engine.is_enabled();
    log::info!(
        "Toggle shortcut {} pressed",
        engine.state.settings.toggle_shortcut
    );
    engine.set_enabled(enabled);
    Some(KeyResult::Suppress)
}

/// Ctrl held: only the fixed chord set, only in normal mode outside fields
pub(super) fn handle_ctrl_chord(
    engine: &mut Engine,
    event: &KeyEvent,
    target: Option<NodeId>,
) -> KeyResult {
    if engine.state.mode != Mode::Normal || is_editable_target(&engine.doc, target) {
        return KeyResult::PassThrough;
    }
    let Some(action) = ctrl_chord(&normalize_key(event)) else {
        return KeyResult::PassThrough;
    };
    engine.hide_help();
    engine.clear_pending_prefix();
    engine.run_action(action);
    KeyResult::Suppress
}
