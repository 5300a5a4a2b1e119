//! Keyboard shortcut system for localshortcut.
//!
//! Turns accelerator strings like "CmdOrCtrl+Shift+K" into matchers and
//! fires callbacks when a window receives a matching key event.
//!
//! Features:
//! - Modifier aliases (Cmd/Command/CmdOrCtrl, Ctrl/Control, Alt/Option, AltGr, Super)
//! - Strict (exact modifiers) and non-strict (at least these modifiers) matching
//! - Per-window, all-window and future-window registration
//! - winit event conversion and an in-memory headless runtime

pub mod headless;
mod matcher;
pub mod modifiers;
pub mod parser;
pub mod platform;
mod registry;

pub use headless::{HeadlessRuntime, HeadlessWindowId};
pub use matcher::{KeyPhase, MatchPolicy, RawKeyEvent, ShortcutMatcher, flags_match, matches};
pub use modifiers::{CanonicalModifier, CanonicalModifierSet, EventFlags, normalize_modifiers};
pub use parser::{
    ModifierToken, ParseError, ParsedAccelerator, is_modifier, parse_accelerator, split,
};
pub use registry::{Callback, Shortcut, ShortcutRegistry, WindowRuntime};

// Re-exported so callers can build options without naming the config crate.
pub use localshortcut_config::RegisterOptions;
