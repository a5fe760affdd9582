//! The per-page engine: owns the page, all state and the scheduler, and
//! turns host events into state transitions

use crate::actions::PrefixKey;
use crate::config::{EngineConfig, SettingsPayload};
use crate::dom::query::{
    editable_target, is_editable_target, is_inside_engine_ui, is_inside_find_ui, is_navigable_field,
};
use crate::dom::{Document, NodeId};
use crate::error::EngineError;
use crate::find::{select_strategy, FindBar, FindBarButton, FindController};
use crate::key_hint::KeyHintMode;
use crate::keyboard::{normalize_key, KeyEvent};
use crate::messaging::{parse_inbound, InboundMessage, Messenger, OutboundMessage, PushMessage};
use crate::scheduler::{Scheduler, Signal, Task, TaskHandle};
use crate::scroll_mode::ScrollDirection;
use crate::state::{EngineState, Mode};

pub struct Engine {
    pub(crate) doc: Document,
    pub(crate) state: EngineState,
    pub(crate) scheduler: Scheduler,
    pub(crate) config: EngineConfig,
    messenger: Box<dyn Messenger>,
    focus_check: Option<TaskHandle>,
}

impl Engine {
    /// Attach to a page. Picks the find highlighting strategy from the page's
    /// capabilities and asks the settings context for the current settings.
    pub fn new(doc: Document, mut config: EngineConfig, messenger: Box<dyn Messenger>) -> Self {
        config.sanitize();
        let find = FindController::new(select_strategy(&doc.capabilities));
        let engine = Self {
            doc,
            state: EngineState::new(find),
            scheduler: Scheduler::new(),
            config,
            messenger,
            focus_check: None,
        };
        engine.send(OutboundMessage::SettingsGet);
        log::info!("Engine attached");
        engine
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Direct page access for the host (page mutations, layout updates)
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn pending_prefix(&self) -> Option<PrefixKey> {
        self.state.pending_prefix
    }

    pub(crate) fn send(&self, message: OutboundMessage) {
        if let Err(e) = self.messenger.send(message) {
            log::debug!("Dropped outbound message: {}", e);
        }
    }

    // ---- mode and prefix ----

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.state.mode != mode {
            log::debug!("Mode {} -> {}", self.state.mode.as_str(), mode.as_str());
        }
        self.state.mode = mode;
        if mode != Mode::Normal {
            self.clear_pending_prefix();
        }
        self.state.fields.sync_highlight(&mut self.doc, mode);
    }

    pub(crate) fn arm_prefix(&mut self, prefix: PrefixKey) {
        self.state.pending_prefix = Some(prefix);
        self.state.key_hint.show_prefix(&mut self.doc, prefix, &self.config);
    }

    pub(crate) fn clear_pending_prefix(&mut self) {
        self.state.pending_prefix = None;
        if self.state.key_hint.mode() == KeyHintMode::Prefix {
            self.state.key_hint.hide(&mut self.doc);
        }
    }

    pub(crate) fn hide_help(&mut self) {
        if self.state.key_hint.mode() == KeyHintMode::Help {
            self.state.key_hint.hide(&mut self.doc);
        }
    }

    /// Focus `field` in insert mode. Ignored for fields that cannot take
    /// focus (hidden, disabled, read-only).
    pub(crate) fn enter_insert_mode(&mut self, field: NodeId) -> bool {
        if !is_navigable_field(&self.doc, field) {
            return false;
        }
        self.set_mode(Mode::Insert);
        self.state.scroll.stop_continuous(&mut self.scheduler);
        self.state
            .fields
            .set_highlighted(&mut self.doc, Some(field), Mode::Insert);
        self.doc.focus(field);
        true
    }

    /// Back to normal mode; the field that had focus stays highlighted
    pub(crate) fn exit_insert_mode(&mut self) {
        let active = self
            .doc
            .active_element()
            .and_then(|el| editable_target(&self.doc, el));
        self.set_mode(Mode::Normal);
        if let Some(field) = active {
            self.state
                .fields
                .set_highlighted(&mut self.doc, Some(field), Mode::Normal);
            self.doc.blur(field);
        }
        self.state.scroll.stop_continuous(&mut self.scheduler);
    }

    /// Cancel everything in flight: scrolling, the pending prefix, popups,
    /// scheduled find work and link hints. Insert mode is left without
    /// touching focus.
    pub(crate) fn reset_transient_state(&mut self) {
        self.state.scroll.clear(&mut self.scheduler);
        self.clear_pending_prefix();
        self.state.key_hint.hide(&mut self.doc);
        self.state.find.cancel_schedule(&mut self.scheduler);
        self.state.hints.hide(&mut self.doc);
        if let Some(handle) = self.focus_check.take() {
            self.scheduler.cancel(handle);
        }
        if self.state.mode == Mode::Insert {
            self.set_mode(Mode::Normal);
        }
    }

    /// Everything `reset_transient_state` does, plus closing find with its
    /// results, dropping the field highlight and blurring a focused field
    fn reset_all(&mut self) {
        if self.state.mode == Mode::Insert {
            self.exit_insert_mode();
        }
        self.reset_transient_state();
        self.state.find.close(&mut self.doc, &mut self.scheduler);
        self.state.find.clear_results(&mut self.doc);
        self.state.find.update_status(&mut self.doc, "");
        self.state
            .fields
            .set_highlighted(&mut self.doc, None, Mode::Normal);
    }

    // ---- settings ----

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Flip the kill switch locally and tell the settings context
    pub fn set_enabled(&mut self, enabled: bool) {
        self.apply_enabled(enabled);
        self.send(OutboundMessage::SettingsSetEnabled { enabled });
    }

    fn apply_enabled(&mut self, enabled: bool) {
        let was = self.state.settings.enabled;
        self.state.settings.enabled = enabled;
        if was && !enabled {
            self.reset_all();
        }
        if was != enabled {
            log::info!("Engine {}", if enabled { "enabled" } else { "disabled" });
        }
    }

    pub fn apply_settings(&mut self, payload: &SettingsPayload) {
        let was = self.state.settings.enabled;
        self.state.settings.apply(payload);
        let enabled = self.state.settings.enabled;
        // apply_enabled compares against the old value
        self.state.settings.enabled = was;
        self.apply_enabled(enabled);
    }

    /// Reply or push from the extension runtime, as raw JSON
    pub fn handle_runtime_message(&mut self, json: &str) -> Result<(), EngineError> {
        match parse_inbound(json)? {
            InboundMessage::Push(PushMessage::SettingsUpdated { settings }) => {
                self.apply_settings(&settings);
            }
            InboundMessage::Response(response) => {
                if !response.ok {
                    log::warn!(
                        "Request failed: {}",
                        response.error.as_deref().unwrap_or("unknown error")
                    );
                } else if let Some(settings) = response.settings {
                    self.apply_settings(&settings);
                }
            }
        }
        Ok(())
    }

    // ---- window and focus ----

    pub fn handle_window_blur(&mut self) {
        self.reset_transient_state();
    }

    pub fn handle_visibility_change(&mut self, visible: bool) {
        if !visible {
            self.reset_transient_state();
        }
    }

    /// Focus moved to `target`. Editable fields switch to insert mode.
    pub fn handle_focus_in(&mut self, target: NodeId) {
        if !self.is_enabled() || is_inside_engine_ui(&self.doc, target) {
            return;
        }
        if let Some(field) = editable_target(&self.doc, target) {
            self.enter_insert_mode(field);
        }
    }

    /// Focus left an element. Whether insert mode ends is decided on the
    /// next frame, once focus has settled.
    pub fn handle_focus_out(&mut self) {
        if self.state.mode != Mode::Insert || self.focus_check.is_some() {
            return;
        }
        self.focus_check = Some(self.scheduler.request_frame(Task::FocusOutCheck));
    }

    fn check_focus(&mut self) {
        self.focus_check = None;
        if self.state.mode == Mode::Insert && !is_editable_target(&self.doc, self.doc.active_element()) {
            self.set_mode(Mode::Normal);
        }
    }

    // ---- find bar ----

    /// The find input's value changed
    pub fn handle_find_input(&mut self, value: &str) {
        if !self.is_enabled() {
            return;
        }
        self.state
            .find
            .on_input(value, &mut self.doc, &mut self.scheduler, &self.config);
    }

    /// A click landed on `target`. Returns true when it hit a find bar button.
    pub fn handle_click(&mut self, target: NodeId) -> bool {
        let Some(bar) = FindBar::get(&self.doc) else {
            return false;
        };
        let Some(button) = bar.button_at(&self.doc, target) else {
            return false;
        };
        match button {
            FindBarButton::Previous | FindBarButton::Next => {
                let value = bar.value(&self.doc);
                let selection = bar.selection_snapshot(&self.doc);
                let backwards = button == FindBarButton::Previous;
                self.state.find.run_from_ui(
                    &value,
                    backwards,
                    false,
                    selection,
                    &mut self.doc,
                    &self.config,
                );
            }
            FindBarButton::Done => self.state.find.close(&mut self.doc, &mut self.scheduler),
        }
        true
    }

    // ---- key up ----

    /// Releasing j or k stops that scroll direction
    pub fn handle_key_up(&mut self, event: &KeyEvent) {
        let direction = match normalize_key(event).as_str() {
            "j" => ScrollDirection::Down,
            "k" => ScrollDirection::Up,
            _ => return,
        };
        if let Some(target) = event.target {
            if is_inside_find_ui(&self.doc, target) {
                return;
            }
        }
        self.state.scroll.release(direction, &mut self.scheduler);
    }

    // ---- scheduler ----

    /// Animation frame at `timestamp` ms. Runs the frame callbacks that were
    /// registered before this frame; ones they register wait for the next.
    pub fn on_animation_frame(&mut self, timestamp: f64) {
        self.scheduler.set_now(timestamp);
        let cutoff = self.scheduler.cutoff();
        while let Some(task) = self.scheduler.pop_frame(cutoff) {
            self.run_task(task, timestamp);
        }
    }

    /// Clock moved to `now` ms; due timers run in deadline order
    pub fn advance_time(&mut self, now: f64) {
        while let Some(task) = self.scheduler.pop_due_timer(now) {
            let at = self.scheduler.now();
            self.run_task(task, at);
        }
        self.scheduler.set_now(now);
    }

    /// The page reported the end of a smooth scroll
    pub fn on_scroll_end(&mut self) {
        let cutoff = self.scheduler.cutoff();
        while let Some(task) = self.scheduler.pop_completion(Signal::ScrollEnd, cutoff) {
            let at = self.scheduler.now();
            self.run_task(task, at);
        }
    }

    fn run_task(&mut self, task: Task, timestamp: f64) {
        match task {
            Task::ScrollTick => {
                self.state
                    .scroll
                    .tick(timestamp, &mut self.doc, &mut self.scheduler, &self.config);
            }
            Task::FindDebounceElapsed => self.state.find.on_debounce_elapsed(&mut self.scheduler),
            Task::FindFlush => self.state.find.flush(&mut self.doc, &self.config),
            Task::DiscreteScrollSettled => {
                self.state
                    .scroll
                    .on_settled(&mut self.doc, &mut self.scheduler, &self.config)
            }
            Task::DiscreteScrollWatchdog => {
                self.state
                    .scroll
                    .on_watchdog(&mut self.doc, &mut self.scheduler, &self.config)
            }
            Task::FocusOutCheck => self.check_focus(),
        }
    }
}
