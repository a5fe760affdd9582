mod common;

use common::{element, Harness};
use shelix_engine::dom::query::LINK_HINT_OVERLAY_ID;
use shelix_engine::dom::Effect;
use shelix_engine::{KeyEvent, KeyResult, NodeId};

fn links(count: usize) -> (Harness, Vec<NodeId>) {
    let mut ids = Vec::new();
    let h = Harness::with_page(|doc| {
        for i in 0..count {
            ids.push(element(doc, "a", &[("href", "#")], 20.0 + i as f64 * 30.0));
        }
    });
    (h, ids)
}

fn key(h: &mut Harness, k: &str) -> KeyResult {
    h.engine.handle_key_down(&KeyEvent::new(k))
}

#[test]
fn twelve_links_get_two_letter_labels() {
    let (mut h, ids) = links(12);
    assert_eq!(key(&mut h, "f"), KeyResult::Suppress);
    let labels: Vec<String> = h
        .engine
        .state()
        .hints
        .hints()
        .iter()
        .map(|hint| hint.label.clone())
        .collect();
    assert_eq!(labels.len(), 12);
    assert_eq!(&labels[..3], &["aa", "as", "ad"]);
    assert_eq!(&labels[9..], &["sa", "ss", "sd"]);

    // 'a' narrows to nine, never activates
    assert_eq!(key(&mut h, "a"), KeyResult::Suppress);
    assert!(h.engine.state().hints.is_active());
    assert_eq!(h.engine.state().hints.visible_labels(h.doc()).len(), 9);

    assert_eq!(key(&mut h, "d"), KeyResult::Suppress);
    assert!(!h.engine.state().hints.is_active());
    assert!(h.doc().get_element_by_id(LINK_HINT_OVERLAY_ID).is_none());
    assert_eq!(h.doc().active_element(), Some(ids[2]));
    assert!(h.doc().effects().contains(&Effect::Click(ids[2])));
}

#[test]
fn space_aborts_hints_without_scrolling() {
    let (mut h, _) = links(2);
    key(&mut h, "f");
    assert_eq!(key(&mut h, " "), KeyResult::Suppress);
    assert!(!h.engine.state().hints.is_active());
    assert!(h.doc().get_element_by_id(LINK_HINT_OVERLAY_ID).is_none());
    assert_eq!(h.doc().scroll_y(), 0.0);
    assert!(h.doc().effects().is_empty());
}

#[test]
fn hint_mode_swallows_mapped_keys() {
    let (mut h, _) = links(3);
    key(&mut h, "f");
    // 'j' is not a label; it aborts instead of scrolling
    assert_eq!(key(&mut h, "j"), KeyResult::Suppress);
    assert!(!h.engine.state().hints.is_active());
    assert!(!h.engine.state().scroll.is_looping());
}

#[test]
fn escape_and_backspace() {
    let (mut h, _) = links(12);
    key(&mut h, "f");
    key(&mut h, "s");
    assert_eq!(h.engine.state().hints.visible_labels(h.doc()).len(), 3);
    assert_eq!(key(&mut h, "Backspace"), KeyResult::Suppress);
    assert_eq!(h.engine.state().hints.visible_labels(h.doc()).len(), 12);

    assert_eq!(key(&mut h, "Shift"), KeyResult::PassThrough);
    assert!(h.engine.state().hints.is_active());

    assert_eq!(key(&mut h, "Escape"), KeyResult::Suppress);
    assert!(!h.engine.state().hints.is_active());
    assert!(h.doc().effects().iter().all(|e| !matches!(e, Effect::Click(_))));
}

#[test]
fn no_clickables_means_no_hint_mode() {
    let mut h = Harness::new();
    key(&mut h, "f");
    assert!(!h.engine.state().hints.is_active());
    assert_eq!(key(&mut h, "x"), KeyResult::PassThrough);
}
