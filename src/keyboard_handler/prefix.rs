use super::KeyResult;
use crate::actions::{prefix_binding, KeyBinding, PrefixKey};
use crate::engine::Engine;
use crate::keyboard::{action_key, is_modifier_key, normalize_key, KeyEvent};

/// Second key of a prefixed sequence. Any key other than a bare modifier
/// ends the prefix; Escape and unmapped keys just cancel it.
pub(super) fn handle_pending_prefix(
    engine: &mut Engine,
    prefix: PrefixKey,
    event: &KeyEvent,
) -> KeyResult {
    let key = normalize_key(event);
    if is_modifier_key(&key) {
        // Shift on its way to a shifted key
        return KeyResult::Consumed;
    }

    engine.clear_pending_prefix();
    if key == "escape" {
        return KeyResult::Suppress;
    }

    match prefix_binding(prefix, &action_key(event)) {
        Some(KeyBinding::Action(action)) => engine.run_action(action),
        Some(KeyBinding::Prefix(next)) => engine.arm_prefix(next),
        None => log::debug!("No binding for '{}' after {}", key, prefix.title()),
    }
    KeyResult::Suppress
}
