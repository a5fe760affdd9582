use super::KeyResult;
use crate::engine::Engine;
use crate::keyboard::{normalize_key, single_char, KeyEvent};
use crate::link_hints::HintInputResult;

/// Hint mode owns the keyboard: printable characters narrow the labels,
/// Backspace widens them again, Escape and Space leave
pub(super) fn handle_link_hint_key(engine: &mut Engine, event: &KeyEvent) -> KeyResult {
    match normalize_key(event).as_str() {
        "escape" => {
            engine.state.hints.hide(&mut engine.doc);
            return KeyResult::Suppress;
        }
        "backspace" => {
            engine.state.hints.backspace(&mut engine.doc);
            return KeyResult::Suppress;
        }
        // Never a label character; letting it through would scroll the
        // page under the badges
        " " => {
            log::debug!("Space aborts link hints");
            engine.state.hints.hide(&mut engine.doc);
            return KeyResult::Suppress;
        }
        _ => {}
    }
    if event.modifiers.control {
        return KeyResult::PassThrough;
    }
    let Some(c) = single_char(&event.key) else {
        return KeyResult::PassThrough;
    };

    match engine.state.hints.handle_char(c, &mut engine.doc) {
        HintInputResult::Activated(element) => {
            log::info!("Activating hinted element {:?}", element);
            engine.doc.focus(element);
            engine.doc.click(element);
        }
        HintInputResult::Narrowed => {}
        HintInputResult::Aborted => log::debug!("No hint starts with '{}'", c),
    }
    KeyResult::Suppress
}
