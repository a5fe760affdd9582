mod common;

use common::Harness;
use shelix_engine::scroll_mode::ScrollDirection;
use shelix_engine::{KeyEvent, KeyResult};

#[test]
fn holding_j_scrolls_until_release() {
    let mut h = Harness::new();
    assert_eq!(h.engine.handle_key_down(&KeyEvent::new("j")), KeyResult::Suppress);
    assert!(h.engine.state().scroll.is_held(ScrollDirection::Down));

    h.engine.on_animation_frame(1000.0);
    assert_eq!(h.doc().scroll_y(), 0.0);
    h.engine.on_animation_frame(1016.0);
    assert!((h.doc().scroll_y() - 19.2).abs() < 1e-9);

    // a long gap is capped at 50ms
    h.engine.on_animation_frame(2016.0);
    assert!((h.doc().scroll_y() - 79.2).abs() < 1e-9);

    h.engine.handle_key_up(&KeyEvent::new("j"));
    assert!(!h.engine.state().scroll.is_looping());
    h.engine.on_animation_frame(2032.0);
    assert!((h.doc().scroll_y() - 79.2).abs() < 1e-9);
}

#[test]
fn opposite_keys_cancel_out() {
    let mut h = Harness::new();
    h.engine.document_mut().scroll_to(500.0, false);
    h.engine.handle_key_down(&KeyEvent::new("j"));
    h.engine.handle_key_down(&KeyEvent::new("k"));
    assert_eq!(h.engine.state().scroll.direction(), 0);
    h.engine.on_animation_frame(0.0);
    h.engine.on_animation_frame(16.0);
    assert_eq!(h.doc().scroll_y(), 500.0);

    h.engine.handle_key_up(&KeyEvent::new("j"));
    assert_eq!(h.engine.state().scroll.direction(), -1);
}

#[test]
fn stall_at_the_bottom_releases_keys() {
    let mut h = Harness::new();
    h.engine.document_mut().scroll_to(2400.0, false);
    h.engine.handle_key_down(&KeyEvent::new("j"));
    for t in [0.0, 16.0, 32.0, 48.0] {
        h.engine.on_animation_frame(t);
    }
    let scroll = &h.engine.state().scroll;
    assert!(!scroll.is_held(ScrollDirection::Down));
    assert!(!scroll.is_looping());
    assert_eq!(h.doc().scroll_y(), 2400.0);
}

#[test]
fn smooth_half_pages_queue_until_scroll_end() {
    let mut h = Harness::new();
    let ctrl_d = KeyEvent::new("d").with_ctrl();
    h.engine.handle_key_down(&ctrl_d);
    assert_eq!(h.doc().scroll_y(), 300.0);
    assert!(h.engine.state().scroll.is_discrete_pending());

    h.engine.handle_key_down(&ctrl_d);
    assert_eq!(h.doc().scroll_y(), 300.0);

    h.engine.on_scroll_end();
    assert_eq!(h.doc().scroll_y(), 600.0);
    assert!(h.engine.state().scroll.is_discrete_pending());

    // scroll-end never arrives for the queued one; the watchdog finishes it
    h.engine.advance_time(800.0);
    assert!(!h.engine.state().scroll.is_discrete_pending());
    assert_eq!(h.engine.scheduler().pending_count(), 0);
}

#[test]
fn blur_stops_everything() {
    let mut h = Harness::new();
    h.engine.handle_key_down(&KeyEvent::new("j"));
    h.engine.handle_key_down(&KeyEvent::new("d").with_ctrl());
    h.engine.handle_window_blur();
    let scroll = &h.engine.state().scroll;
    assert_eq!(scroll.direction(), 0);
    assert!(!scroll.is_looping());
    assert!(!scroll.is_discrete_pending());
    assert_eq!(h.engine.scheduler().pending_count(), 0);
}
