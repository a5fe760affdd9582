//! Key-down dispatch: decides which subsystem owns a key and whether the
//! page's default handling is suppressed

mod find_bar;
mod link_hint;
mod prefix;
mod shortcuts;

use std::panic::{self, AssertUnwindSafe};

use crate::actions::{normal_binding, Action, KeyBinding};
use crate::dom::query::{is_editable_target, is_inside_find_ui};
use crate::engine::Engine;
use crate::keyboard::{action_key, normalize_key, KeyEvent};
use crate::state::Mode;

/// Outcome of a key-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Handled; the page must not see the key (`preventDefault`)
    Suppress,
    /// Handled without suppressing default behaviour
    Consumed,
    /// Not ours; the page handles it as usual
    PassThrough,
}

impl KeyResult {
    pub fn prevents_default(self) -> bool {
        self == KeyResult::Suppress
    }
}

impl Engine {
    /// Handle a key-down. Never panics outward: a failure inside dispatch is
    /// logged, transient state is reset and the key goes to the page.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> KeyResult {
        match panic::catch_unwind(AssertUnwindSafe(|| self.dispatch_key_down(event))) {
            Ok(result) => result,
            Err(_) => {
                log::error!("Key dispatch failed for '{}', resetting", event.key);
                self.reset_transient_state();
                KeyResult::PassThrough
            }
        }
    }

    fn dispatch_key_down(&mut self, event: &KeyEvent) -> KeyResult {
        if event.default_prevented || event.is_composing {
            return KeyResult::PassThrough;
        }

        if let Some(result) = shortcuts::check_toggle_shortcut(self, event) {
            return result;
        }
        if !self.is_enabled() {
            return KeyResult::PassThrough;
        }

        let target = event.target.or_else(|| self.doc.active_element());
        if let Some(target) = target {
            if is_inside_find_ui(&self.doc, target) {
                return find_bar::handle_find_bar_key(self, event);
            }
        }

        if event.modifiers.meta || event.modifiers.alt {
            return KeyResult::PassThrough;
        }

        if self.state.hints.is_active() {
            return link_hint::handle_link_hint_key(self, event);
        }

        if self.state.mode == Mode::Insert && !is_editable_target(&self.doc, self.doc.active_element()) {
            self.set_mode(Mode::Normal);
        }

        let key = normalize_key(event);

        if key == "escape" && self.state.find.is_open(&self.doc) {
            self.state.find.close(&mut self.doc, &mut self.scheduler);
            return KeyResult::Suppress;
        }

        if event.modifiers.control {
            return shortcuts::handle_ctrl_chord(self, event, target);
        }

        if let Some(prefix) = self.state.pending_prefix {
            return prefix::handle_pending_prefix(self, prefix, event);
        }

        if key == "escape" {
            return match self.state.mode {
                Mode::Insert => {
                    self.exit_insert_mode();
                    KeyResult::Suppress
                }
                Mode::Normal => {
                    self.hide_help();
                    self.state.find.clear_results(&mut self.doc);
                    self.state.find.update_status(&mut self.doc, "");
                    self.state.fields.set_highlighted(&mut self.doc, None, Mode::Normal);
                    KeyResult::Suppress
                }
            };
        }

        if self.state.mode != Mode::Normal || is_editable_target(&self.doc, target) {
            return KeyResult::PassThrough;
        }

        // Unmapped keys, bare modifiers included, leave every popup alone
        let Some(binding) = normal_binding(&action_key(event)) else {
            return KeyResult::PassThrough;
        };
        if binding != KeyBinding::Action(Action::HelpShow) {
            self.hide_help();
        }
        match binding {
            KeyBinding::Action(action) => self.run_action(action),
            KeyBinding::Prefix(prefix) => self.arm_prefix(prefix),
        }
        KeyResult::Suppress
    }
}
