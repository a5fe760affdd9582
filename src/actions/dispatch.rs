use super::Action;
use crate::engine::Engine;
use crate::field_nav::CycleDirection;
use crate::key_hint::KeyHintMode;
use crate::messaging::OutboundMessage;
use crate::scroll_mode::ScrollDirection;

impl Engine {
    /// Invoke an action by its dotted identifier. Returns false for unknown ids.
    pub fn run_action_id(&mut self, id: &str) -> bool {
        match id.parse::<Action>() {
            Ok(action) => {
                self.run_action(action);
                true
            }
            Err(()) => {
                log::warn!("Unknown action '{}'", id);
                false
            }
        }
    }

    pub fn run_action(&mut self, action: Action) {
        log::debug!("Running {}", action);
        let mode = self.state.mode;
        match action {
            Action::ScrollDownStart => self.state.scroll.start(ScrollDirection::Down, &mut self.scheduler),
            Action::ScrollUpStart => self.state.scroll.start(ScrollDirection::Up, &mut self.scheduler),
            Action::ScrollTop => self.state.scroll.scroll_to_top(&mut self.doc, &mut self.scheduler),
            Action::ScrollBottom => self.state.scroll.scroll_to_bottom(&mut self.doc, &mut self.scheduler),
            Action::ScrollHalfPageUp | Action::ScrollHalfPageDown => {
                let direction = if action == Action::ScrollHalfPageUp {
                    ScrollDirection::Up
                } else {
                    ScrollDirection::Down
                };
                self.state
                    .scroll
                    .half_page(direction, &mut self.doc, &mut self.scheduler, &self.config);
            }
            Action::ScrollPageUp | Action::ScrollPageDown => {
                let direction = if action == Action::ScrollPageUp {
                    ScrollDirection::Up
                } else {
                    ScrollDirection::Down
                };
                self.state
                    .scroll
                    .full_page(direction, &mut self.doc, &mut self.scheduler, &self.config);
            }
            Action::FindOpen => {
                self.hide_help();
                self.state.find.open(&mut self.doc, &self.config);
            }
            Action::FindNext => {
                self.state.find.navigate(false, &mut self.doc, &self.config);
            }
            Action::FindPrevious => {
                self.state.find.navigate(true, &mut self.doc, &self.config);
            }
            Action::HelpShow => {
                if self.state.key_hint.mode() == KeyHintMode::Help {
                    self.state.key_hint.hide(&mut self.doc);
                } else {
                    self.state.key_hint.show_help(&mut self.doc, &self.config);
                }
            }
            Action::InputPrevious => self.state.fields.cycle(CycleDirection::Previous, &mut self.doc, mode),
            Action::InputNext => self.state.fields.cycle(CycleDirection::Next, &mut self.doc, mode),
            Action::InputInsertHighlighted => {
                if let Some(field) = self.state.fields.ensure_highlighted(&mut self.doc, mode) {
                    self.enter_insert_mode(field);
                }
            }
            Action::InputInsertFirst => {
                if let Some(field) = self.state.fields.highlighted_or_first(&mut self.doc, mode) {
                    self.enter_insert_mode(field);
                }
            }
            Action::InputClearHighlight => self.state.fields.set_highlighted(&mut self.doc, None, mode),
            Action::LinkHintShow => {
                self.hide_help();
                let alphabet = self.config.hint_alphabet();
                if self.state.hints.show(&mut self.doc, &alphabet) == 0 {
                    log::debug!("No clickable elements to hint");
                }
            }
            Action::HistoryBack => self.doc.history_back(),
            Action::HistoryForward => self.doc.history_forward(),
            Action::TabNext
            | Action::TabPrevious
            | Action::TabNew
            | Action::TabClose
            | Action::TabDuplicate => {
                if let Some(tab) = action.tab_action() {
                    self.send(OutboundMessage::TabAction { action: tab });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::TabAction;
    use crate::config::EngineConfig;
    use crate::dom::fixtures::*;
    use crate::dom::Effect;
    use crate::messaging::ChannelMessenger;
    use crate::state::Mode;

    #[test]
    fn test_tab_actions_send_messages() {
        let (messenger, mut rx) = ChannelMessenger::new();
        let mut engine = Engine::new(page(), EngineConfig::default(), Box::new(messenger));
        rx.try_recv().unwrap();

        engine.run_action(Action::TabDuplicate);
        assert_eq!(
            rx.try_recv().unwrap().message,
            OutboundMessage::TabAction {
                action: TabAction::Duplicate
            }
        );
    }

    #[test]
    fn test_history_and_unknown_ids() {
        let (messenger, _rx) = ChannelMessenger::new();
        let mut engine = Engine::new(page(), EngineConfig::default(), Box::new(messenger));
        assert!(engine.run_action_id("history.back"));
        assert!(engine.run_action_id("history.forward"));
        assert!(!engine.run_action_id("history.sideways"));
        assert_eq!(
            engine.document().effects(),
            &[Effect::HistoryBack, Effect::HistoryForward]
        );
    }

    #[test]
    fn test_help_toggles() {
        let (messenger, _rx) = ChannelMessenger::new();
        let mut engine = Engine::new(page(), EngineConfig::default(), Box::new(messenger));
        engine.run_action(Action::HelpShow);
        assert_eq!(engine.state().key_hint.mode(), KeyHintMode::Help);
        engine.run_action(Action::HelpShow);
        assert_eq!(engine.state().key_hint.mode(), KeyHintMode::Hidden);
    }

    #[test]
    fn test_insert_first_focuses_first_field() {
        let (messenger, _rx) = ChannelMessenger::new();
        let mut engine = Engine::new(page(), EngineConfig::default(), Box::new(messenger));
        let body = engine.document().body();
        let first = add(engine.document_mut(), body, "input", &[], rect(10.0));
        add(engine.document_mut(), body, "input", &[], rect(40.0));

        engine.run_action(Action::InputInsertFirst);
        assert_eq!(engine.mode(), Mode::Insert);
        assert_eq!(engine.document().active_element(), Some(first));
    }
}
