//! Integration tests for localshortcut-keybindings.
//!
//! These tests exercise the full parse → register → dispatch pipeline through
//! the headless runtime, including window lifecycle behaviour.

use localshortcut_keybindings::{
    EventFlags, HeadlessRuntime, ParseError, RawKeyEvent, RegisterOptions,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    (count, move || {
        handle.fetch_add(1, Ordering::SeqCst);
    })
}

fn fired(count: &AtomicUsize) -> usize {
    count.load(Ordering::SeqCst)
}

// ---------------------------------------------------------------------------
// End-to-end matching
// ---------------------------------------------------------------------------

#[test]
fn cmd_or_ctrl_shift_p_fires_once() {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();
    let (count, cb) = counter();

    runtime
        .register("CmdOrCtrl+Shift+P", cb, RegisterOptions::default(), Some(window))
        .unwrap();

    let hit = RawKeyEvent::key_down("p", EventFlags::META | EventFlags::SHIFT);
    assert_eq!(runtime.deliver(window, &hit), 1);
    assert_eq!(fired(&count), 1);

    // Missing shift
    let miss = RawKeyEvent::key_down("p", EventFlags::META);
    assert_eq!(runtime.deliver(window, &miss), 0);
    assert_eq!(fired(&count), 1);
}

#[test]
fn strict_alt_f4_ignores_extra_shift() {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();
    let (count, cb) = counter();

    runtime
        .register("Alt+F4", cb, RegisterOptions::strict(), Some(window))
        .unwrap();

    let event = RawKeyEvent::key_down("F4", EventFlags::ALT | EventFlags::SHIFT);
    runtime.deliver(window, &event);
    assert_eq!(fired(&count), 0);

    let exact = RawKeyEvent::key_down("F4", EventFlags::ALT);
    runtime.deliver(window, &exact);
    assert_eq!(fired(&count), 1);
}

#[test]
fn key_compares_by_case_only() {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();
    let (short, short_cb) = counter();
    let (full, full_cb) = counter();

    runtime
        .register("Esc", short_cb, RegisterOptions::default(), Some(window))
        .unwrap();
    runtime
        .register("escape", full_cb, RegisterOptions::default(), Some(window))
        .unwrap();

    let event = RawKeyEvent::key_down("Escape", EventFlags::empty());
    assert_eq!(runtime.deliver(window, &event), 1);
    assert_eq!(fired(&short), 0);
    assert_eq!(fired(&full), 1);
}

#[test]
fn non_strict_tolerates_extra_modifiers() {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();
    let (count, cb) = counter();

    runtime
        .register("Shift+A", cb, RegisterOptions::default(), None)
        .unwrap();

    let event = RawKeyEvent::key_down("A", EventFlags::SHIFT | EventFlags::CONTROL);
    runtime.deliver(window, &event);
    assert_eq!(fired(&count), 1);
}

#[test]
fn key_up_never_fires() {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();
    let (count, cb) = counter();

    runtime
        .register("Ctrl+K", cb, RegisterOptions::default(), None)
        .unwrap();

    runtime.deliver(window, &RawKeyEvent::key_up("k", EventFlags::CONTROL));
    assert_eq!(fired(&count), 0);
}

#[test]
fn key_comparison_ignores_case() {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();
    let (count, cb) = counter();

    runtime
        .register("Ctrl+k", cb, RegisterOptions::default(), None)
        .unwrap();

    runtime.deliver(window, &RawKeyEvent::key_down("K", EventFlags::CONTROL));
    assert_eq!(fired(&count), 1);
}

#[test]
fn altgr_and_ctrl_share_the_control_flag() {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();
    let (count, cb) = counter();

    runtime
        .register("AltGr+E", cb, RegisterOptions::strict(), None)
        .unwrap();

    runtime.deliver(window, &RawKeyEvent::key_down("e", EventFlags::CONTROL));
    assert_eq!(fired(&count), 1);
}

// ---------------------------------------------------------------------------
// Window lifecycle
// ---------------------------------------------------------------------------

#[test]
fn all_window_shortcut_reaches_existing_and_future_windows() {
    let mut runtime = HeadlessRuntime::new();
    let first = runtime.open_window();
    let second = runtime.open_window();
    let (count, cb) = counter();

    runtime
        .register("Ctrl+K", cb, RegisterOptions::default(), None)
        .unwrap();
    let later = runtime.open_window();

    let event = RawKeyEvent::key_down("k", EventFlags::CONTROL);
    for window in [first, second, later] {
        assert_eq!(runtime.deliver(window, &event), 1);
    }
    assert_eq!(fired(&count), 3);
}

#[test]
fn window_shortcut_stays_on_its_window() {
    let mut runtime = HeadlessRuntime::new();
    let target = runtime.open_window();
    let other = runtime.open_window();
    let (count, cb) = counter();

    runtime
        .register("Ctrl+K", cb, RegisterOptions::default(), Some(target))
        .unwrap();
    let later = runtime.open_window();

    let event = RawKeyEvent::key_down("k", EventFlags::CONTROL);
    assert_eq!(runtime.deliver(other, &event), 0);
    assert_eq!(runtime.deliver(later, &event), 0);
    assert_eq!(runtime.deliver(target, &event), 1);
    assert_eq!(fired(&count), 1);
    assert_eq!(runtime.registry().future_count(), 0);
}

#[test]
fn closed_window_stops_firing_but_others_continue() {
    let mut runtime = HeadlessRuntime::new();
    let first = runtime.open_window();
    let second = runtime.open_window();
    let (count, cb) = counter();

    runtime
        .register("Ctrl+K", cb, RegisterOptions::default(), None)
        .unwrap();
    runtime.close_window(first);

    let event = RawKeyEvent::key_down("k", EventFlags::CONTROL);
    assert_eq!(runtime.deliver(first, &event), 0);
    assert_eq!(runtime.deliver(second, &event), 1);
    assert!(runtime.registry().shortcuts_for(first).is_empty());
    assert_eq!(fired(&count), 1);
}

#[test]
fn registration_before_any_window_applies_to_new_windows() {
    let mut runtime = HeadlessRuntime::new();
    let (count, cb) = counter();

    runtime
        .register("F5", cb, RegisterOptions::default(), None)
        .unwrap();
    assert_eq!(runtime.registry().len(), 0);
    assert_eq!(runtime.registry().future_count(), 1);

    let window = runtime.open_window();
    runtime.deliver(window, &RawKeyEvent::key_down("F5", EventFlags::empty()));
    assert_eq!(fired(&count), 1);
}

#[test]
fn overlapping_registrations_fire_independently() {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();
    let (loose_count, loose) = counter();
    let (strict_count, strict) = counter();

    runtime
        .register("Ctrl+S", loose, RegisterOptions::default(), None)
        .unwrap();
    runtime
        .register("Control+S", strict, RegisterOptions::strict(), Some(window))
        .unwrap();

    let exact = RawKeyEvent::key_down("s", EventFlags::CONTROL);
    assert_eq!(runtime.deliver(window, &exact), 2);

    let extra = RawKeyEvent::key_down("s", EventFlags::CONTROL | EventFlags::ALT);
    assert_eq!(runtime.deliver(window, &extra), 1);

    assert_eq!(fired(&loose_count), 2);
    assert_eq!(fired(&strict_count), 1);
}

#[test]
fn duplicate_registration_fires_twice() {
    let mut runtime = HeadlessRuntime::new();
    let window = runtime.open_window();
    let (count, cb) = counter();
    let cb = Arc::new(cb);

    for _ in 0..2 {
        let cb = Arc::clone(&cb);
        runtime
            .register("Ctrl+D", move || cb(), RegisterOptions::default(), None)
            .unwrap();
    }

    runtime.deliver(window, &RawKeyEvent::key_down("d", EventFlags::CONTROL));
    assert_eq!(fired(&count), 2);
}

// ---------------------------------------------------------------------------
// Rejected accelerators
// ---------------------------------------------------------------------------

#[test]
fn modifier_only_accelerator_is_rejected() {
    let mut runtime = HeadlessRuntime::new();
    runtime.open_window();

    let err = runtime
        .register("CmdOrCtrl+Shift", || {}, RegisterOptions::default(), None)
        .unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingKey {
            accelerator: "CmdOrCtrl+Shift".to_string()
        }
    );
    assert!(runtime.registry().is_empty());
}

#[test]
fn two_key_accelerator_is_rejected() {
    let mut runtime = HeadlessRuntime::new();
    let err = runtime
        .register("Ctrl+K+L", || {}, RegisterOptions::default(), None)
        .unwrap_err();
    assert!(matches!(err, ParseError::MultipleKeys { ref keys, .. } if keys.len() == 2));
}

#[test]
fn lowercase_modifier_name_is_treated_as_a_key() {
    let mut runtime = HeadlessRuntime::new();
    // "shift" is not a modifier, so this accelerator has two keys
    let err = runtime
        .register("shift+K", || {}, RegisterOptions::default(), None)
        .unwrap_err();
    assert!(matches!(err, ParseError::MultipleKeys { .. }));
}
