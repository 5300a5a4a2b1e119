//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `ShortcutConfig` fields.

use crate::types::{ShortcutAction, ShortcutBinding};

pub fn initial_windows() -> usize {
    1
}

pub fn window_title() -> String {
    "localshortcut".to_string()
}

/// Shortcuts written to a fresh config file.
pub fn shortcuts() -> Vec<ShortcutBinding> {
    vec![
        ShortcutBinding::new("CmdOrCtrl+Shift+P", ShortcutAction::Log),
        ShortcutBinding::new("CmdOrCtrl+Shift+N", ShortcutAction::NewWindow),
        ShortcutBinding::new("CmdOrCtrl+W", ShortcutAction::CloseWindow),
        ShortcutBinding {
            strict: true,
            ..ShortcutBinding::new("Alt+F4", ShortcutAction::Quit)
        },
    ]
}
