//! Conversion from winit keyboard input to [`RawKeyEvent`].
//!
//! Contains:
//! - Modifier state → `EventFlags` (Super/Cmd is reported as `META`)
//! - Logical key → key name in the DOM-style spelling used by accelerators
//!
//! `Super` always maps to `META`. On X11 the Super key may arrive as a
//! different modifier (Mod4), which winit already folds into `super_key()`.

use crate::matcher::{KeyPhase, RawKeyEvent};
use crate::modifiers::EventFlags;
use winit::event::{ElementState, KeyEvent, Modifiers};
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Map winit modifier state onto event flags.
pub fn event_flags(state: ModifiersState) -> EventFlags {
    let mut flags = EventFlags::empty();
    flags.set(EventFlags::META, state.super_key());
    flags.set(EventFlags::CONTROL, state.control_key());
    flags.set(EventFlags::SHIFT, state.shift_key());
    flags.set(EventFlags::ALT, state.alt_key());
    flags
}

/// Name of a logical key, or `None` for unidentified and dead keys.
pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_string()),
        // Space is reported as a character by browsers; keep that spelling
        Key::Named(NamedKey::Space) => Some(" ".to_string()),
        Key::Named(named) => Some(format!("{:?}", named)),
        _ => None,
    }
}

/// Build a raw key event from a winit key event and the current modifiers.
///
/// Returns `None` when the key has no usable name. Auto-repeat presses are
/// reported as key-down, like the initial press.
pub fn raw_key_event(event: &KeyEvent, modifiers: &Modifiers) -> Option<RawKeyEvent> {
    let key = key_name(&event.logical_key)?;
    let phase = match event.state {
        ElementState::Pressed => KeyPhase::KeyDown,
        ElementState::Released => KeyPhase::KeyUp,
    };
    Some(RawKeyEvent {
        phase,
        key,
        flags: event_flags(modifiers.state()),
    })
}

// Note: `winit::event::KeyEvent` has private fields and cannot be built in
// tests, so `raw_key_event` is exercised through the demo app. Its two
// building blocks are tested directly.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{MatchPolicy, matches};

    #[test]
    fn test_event_flags_empty() {
        assert_eq!(event_flags(ModifiersState::empty()), EventFlags::empty());
    }

    #[test]
    fn test_event_flags_super_is_meta() {
        let flags = event_flags(ModifiersState::SUPER | ModifiersState::SHIFT);
        assert_eq!(flags, EventFlags::META | EventFlags::SHIFT);
    }

    #[test]
    fn test_event_flags_all() {
        let state = ModifiersState::SUPER
            | ModifiersState::CONTROL
            | ModifiersState::SHIFT
            | ModifiersState::ALT;
        assert_eq!(event_flags(state), EventFlags::all());
    }

    #[test]
    fn test_key_name_character() {
        assert_eq!(key_name(&Key::Character("k".into())), Some("k".to_string()));
    }

    #[test]
    fn test_key_name_named() {
        assert_eq!(key_name(&Key::Named(NamedKey::F4)), Some("F4".to_string()));
        assert_eq!(
            key_name(&Key::Named(NamedKey::ArrowUp)),
            Some("ArrowUp".to_string())
        );
        assert_eq!(
            key_name(&Key::Named(NamedKey::Space)),
            Some(" ".to_string())
        );
    }

    #[test]
    fn test_key_name_unusable() {
        assert_eq!(key_name(&Key::Dead(None)), None);
    }

    #[test]
    fn test_named_keys_use_event_spelling() {
        let pairs = [
            (NamedKey::Enter, "Enter", "Return"),
            (NamedKey::Escape, "Escape", "Esc"),
            (NamedKey::ArrowLeft, "ArrowLeft", "Left"),
            (NamedKey::PageDown, "PageDown", "PgDn"),
        ];
        for (named, accepted, rejected) in pairs {
            let event = RawKeyEvent::key_down(
                key_name(&Key::Named(named)).unwrap(),
                EventFlags::empty(),
            );
            assert!(matches(EventFlags::empty(), MatchPolicy::Strict, accepted, &event));
            assert!(!matches(EventFlags::empty(), MatchPolicy::Strict, rejected, &event));
        }
    }
}
