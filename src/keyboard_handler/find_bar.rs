use super::KeyResult;
use crate::engine::Engine;
use crate::find::FindBar;
use crate::keyboard::{normalize_key, KeyEvent};

/// Keys typed into the find bar. Enter and Ctrl/Cmd+G step through matches
/// (Shift goes backwards), Escape closes; everything else is text.
pub(super) fn handle_find_bar_key(engine: &mut Engine, event: &KeyEvent) -> KeyResult {
    let key = normalize_key(event);
    let m = event.modifiers;

    if key == "escape" {
        engine.state.find.close(&mut engine.doc, &mut engine.scheduler);
        return KeyResult::Suppress;
    }

    let step = key == "enter" || (key == "g" && (m.control || m.meta));
    if !step {
        return KeyResult::PassThrough;
    }
    let (value, selection) = FindBar::get(&engine.doc)
        .map(|bar| (bar.value(&engine.doc), bar.selection_snapshot(&engine.doc)))
        .unwrap_or_default();
    // A step supersedes whatever the debounce was about to run
    engine.state.find.cancel_schedule(&mut engine.scheduler);
    engine
        .state
        .find
        .run_from_ui(&value, m.shift, false, selection, &mut engine.doc, &engine.config);
    KeyResult::Suppress
}
