mod common;

use common::{element, Harness};
use shelix_engine::dom::query::{INPUT_HIGHLIGHT_CLASS, KEY_HINT_CONTAINER_ID};
use shelix_engine::key_hint::KeyHintMode;
use shelix_engine::{KeyEvent, KeyResult, Mode, OutboundMessage, PrefixKey, TabAction};

fn key(h: &mut Harness, k: &str) -> KeyResult {
    h.engine.handle_key_down(&KeyEvent::new(k))
}

#[test]
fn unmapped_key_passes_through_untouched() {
    let mut h = Harness::new();
    assert_eq!(key(&mut h, "x"), KeyResult::PassThrough);
    assert_eq!(key(&mut h, "Tab"), KeyResult::PassThrough);
    assert!(h.doc().effects().is_empty());
    assert!(h.messages().is_empty());
    assert_eq!(h.engine.pending_prefix(), None);
    assert_eq!(h.doc().scroll_y(), 0.0);
}

#[test]
fn goto_prefix_then_tab_next() {
    let mut h = Harness::new();
    assert_eq!(key(&mut h, "g"), KeyResult::Suppress);
    assert_eq!(h.engine.pending_prefix(), Some(PrefixKey::G));
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Prefix);
    let popup = h.doc().get_element_by_id(KEY_HINT_CONTAINER_ID).unwrap();
    assert!(h.doc().text_content(popup).starts_with("Goto"));

    assert_eq!(key(&mut h, "n"), KeyResult::Suppress);
    assert_eq!(h.engine.pending_prefix(), None);
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Hidden);
    assert_eq!(
        h.messages(),
        vec![OutboundMessage::TabAction {
            action: TabAction::Next
        }]
    );
}

#[test]
fn unmapped_key_after_prefix_only_cancels() {
    let mut h = Harness::new();
    key(&mut h, "g");
    assert_eq!(key(&mut h, "x"), KeyResult::Suppress);
    assert_eq!(h.engine.pending_prefix(), None);
    assert!(h.messages().is_empty());
    assert!(h.doc().effects().is_empty());

    // the next key is a fresh normal-mode key
    assert_eq!(key(&mut h, "x"), KeyResult::PassThrough);
}

#[test]
fn g_g_rearms_and_shift_keeps_waiting() {
    let mut h = Harness::new();
    key(&mut h, "g");
    assert_eq!(key(&mut h, "g"), KeyResult::Suppress);
    assert_eq!(h.engine.pending_prefix(), Some(PrefixKey::G));

    assert_eq!(key(&mut h, "Shift"), KeyResult::Consumed);
    assert_eq!(h.engine.pending_prefix(), Some(PrefixKey::G));

    assert_eq!(key(&mut h, "Escape"), KeyResult::Suppress);
    assert_eq!(h.engine.pending_prefix(), None);
}

#[test]
fn goto_bottom_and_top() {
    let mut h = Harness::new();
    key(&mut h, "g");
    key(&mut h, "e");
    assert_eq!(h.doc().scroll_y(), 2400.0);
    key(&mut h, "g");
    key(&mut h, "t");
    assert_eq!(h.doc().scroll_y(), 0.0);
}

#[test]
fn space_prefix_actions() {
    let mut h = Harness::new();
    key(&mut h, " ");
    assert_eq!(h.engine.pending_prefix(), Some(PrefixKey::Space));
    key(&mut h, "d");
    key(&mut h, " ");
    key(&mut h, "q");
    assert_eq!(
        h.messages(),
        vec![
            OutboundMessage::TabAction {
                action: TabAction::Duplicate
            },
            OutboundMessage::TabAction {
                action: TabAction::Close
            },
        ]
    );

    key(&mut h, " ");
    key(&mut h, "?");
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Help);
}

#[test]
fn help_is_dismissed_by_mapped_keys_only() {
    let mut h = Harness::new();
    key(&mut h, "?");
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Help);

    assert_eq!(key(&mut h, "x"), KeyResult::PassThrough);
    assert_eq!(key(&mut h, "Shift"), KeyResult::PassThrough);
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Help);

    assert_eq!(key(&mut h, "j"), KeyResult::Suppress);
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Hidden);
    assert!(h.engine.state().scroll.is_looping());

    key(&mut h, "?");
    key(&mut h, "Escape");
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Hidden);
}

#[test]
fn shift_then_question_mark_closes_help() {
    let mut h = Harness::new();
    let shift = KeyEvent::new("Shift").with_shift();
    let question = KeyEvent::new("?").with_shift();

    h.engine.handle_key_down(&shift);
    assert_eq!(h.engine.handle_key_down(&question), KeyResult::Suppress);
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Help);

    h.engine.handle_key_down(&shift);
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Help);
    h.engine.handle_key_down(&question);
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Hidden);
}

#[test]
fn unmapped_keys_leave_help_and_state_alone() {
    let mut h = Harness::new();
    key(&mut h, "?");

    assert_eq!(h.engine.handle_key_down(&KeyEvent::new("z").with_ctrl()), KeyResult::PassThrough);
    assert_eq!(key(&mut h, "Tab"), KeyResult::PassThrough);
    assert_eq!(key(&mut h, "Control"), KeyResult::PassThrough);
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Help);
    assert_eq!(h.engine.mode(), Mode::Normal);
    assert_eq!(h.engine.pending_prefix(), None);
    assert_eq!(h.doc().scroll_y(), 0.0);
    assert!(h.doc().effects().is_empty());
    assert!(h.messages().is_empty());

    // A mapped chord does close it
    h.engine.document_mut().prefers_reduced_motion = true;
    assert_eq!(h.engine.handle_key_down(&KeyEvent::new("d").with_ctrl()), KeyResult::Suppress);
    assert_eq!(h.engine.state().key_hint.mode(), KeyHintMode::Hidden);
}

#[test]
fn meta_and_alt_chords_are_ignored() {
    let mut h = Harness::new();
    assert_eq!(h.engine.handle_key_down(&KeyEvent::new("j").with_meta()), KeyResult::PassThrough);
    assert_eq!(h.engine.handle_key_down(&KeyEvent::new("g").with_alt()), KeyResult::PassThrough);
    assert_eq!(h.engine.pending_prefix(), None);
}

#[test]
fn composing_and_prevented_keys_are_ignored() {
    let mut h = Harness::new();
    let mut event = KeyEvent::new("g");
    event.is_composing = true;
    assert_eq!(h.engine.handle_key_down(&event), KeyResult::PassThrough);
    let mut event = KeyEvent::new("g");
    event.default_prevented = true;
    assert_eq!(h.engine.handle_key_down(&event), KeyResult::PassThrough);
    assert_eq!(h.engine.pending_prefix(), None);
}

#[test]
fn ctrl_chords_scroll_and_navigate_history() {
    let mut h = Harness::new();
    h.engine.document_mut().prefers_reduced_motion = true;
    assert_eq!(h.engine.handle_key_down(&KeyEvent::new("d").with_ctrl()), KeyResult::Suppress);
    assert_eq!(h.doc().scroll_y(), 300.0);
    h.engine.handle_key_down(&KeyEvent::new("f").with_ctrl());
    assert_eq!(h.doc().scroll_y(), 900.0);
    h.engine.handle_key_down(&KeyEvent::new("u").with_ctrl());
    assert_eq!(h.doc().scroll_y(), 600.0);

    h.engine.handle_key_down(&KeyEvent::new("o").with_ctrl());
    assert!(h.doc().effects().contains(&shelix_engine::dom::Effect::HistoryBack));

    assert_eq!(h.engine.handle_key_down(&KeyEvent::new("x").with_ctrl()), KeyResult::PassThrough);
}

#[test]
fn focus_in_enters_insert_and_escape_leaves() {
    let mut input = None;
    let mut h = Harness::with_page(|doc| {
        input = Some(element(doc, "input", &[], 100.0));
    });
    let input = input.unwrap();

    h.engine.handle_focus_in(input);
    assert_eq!(h.engine.mode(), Mode::Insert);
    assert_eq!(h.engine.handle_key_down(&KeyEvent::new("j").on(input)), KeyResult::PassThrough);
    assert!(!h.engine.state().scroll.is_looping());

    assert_eq!(h.engine.handle_key_down(&KeyEvent::new("Escape").on(input)), KeyResult::Suppress);
    assert_eq!(h.engine.mode(), Mode::Normal);
    assert_ne!(h.doc().active_element(), Some(input));
    assert!(h.doc().has_class(input, INPUT_HIGHLIGHT_CLASS));

    // Escape again in normal mode drops the highlight
    key(&mut h, "Escape");
    assert!(!h.doc().has_class(input, INPUT_HIGHLIGHT_CLASS));
}

#[test]
fn h_l_cycle_and_i_inserts() {
    let mut fields = Vec::new();
    let mut h = Harness::with_page(|doc| {
        for i in 0..3 {
            fields.push(element(doc, "input", &[], 100.0 + i as f64 * 40.0));
        }
    });

    key(&mut h, "h");
    assert_eq!(h.engine.state().fields.highlighted(), Some(fields[2]));
    key(&mut h, "l");
    assert_eq!(h.engine.state().fields.highlighted(), Some(fields[0]));
    key(&mut h, "l");
    assert_eq!(h.engine.state().fields.highlighted(), Some(fields[1]));

    key(&mut h, "Enter");
    assert_eq!(h.engine.mode(), Mode::Insert);
    assert_eq!(h.doc().active_element(), Some(fields[1]));
}

#[test]
fn stale_insert_mode_is_resynchronised() {
    let mut input = None;
    let mut h = Harness::with_page(|doc| {
        input = Some(element(doc, "input", &[], 100.0));
    });
    let input = input.unwrap();
    h.engine.handle_focus_in(input);
    h.engine.document_mut().remove(input);

    assert_eq!(key(&mut h, "g"), KeyResult::Suppress);
    assert_eq!(h.engine.mode(), Mode::Normal);
    assert_eq!(h.engine.pending_prefix(), Some(PrefixKey::G));
}
