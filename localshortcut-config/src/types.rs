//! Shortcut binding and option types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Registration Options
// ============================================================================

/// Options accepted when registering a shortcut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterOptions {
    /// Require the exact modifier set (no extra held modifiers).
    #[serde(default)]
    pub strict: bool,
}

impl RegisterOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

// ============================================================================
// Shortcut Bindings
// ============================================================================

/// What the demo application does when a configured shortcut fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutAction {
    /// Write a log line naming the shortcut
    #[default]
    Log,
    /// Open another window (it receives every all-window shortcut)
    NewWindow,
    /// Close the window the shortcut fired in
    CloseWindow,
    /// Exit the event loop
    Quit,
}

/// A shortcut configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutBinding {
    /// Accelerator string, e.g. "CmdOrCtrl+Shift+P"
    pub accelerator: String,
    #[serde(default)]
    pub action: ShortcutAction,
    #[serde(default)]
    pub strict: bool,
    /// Index of an initially opened window to bind to.
    /// When absent the shortcut applies to all present and future windows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<usize>,
}

impl ShortcutBinding {
    pub fn new(accelerator: impl Into<String>, action: ShortcutAction) -> Self {
        Self {
            accelerator: accelerator.into(),
            action,
            strict: false,
            window: None,
        }
    }

    pub fn options(&self) -> RegisterOptions {
        RegisterOptions {
            strict: self.strict,
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Log level configuration.
///
/// Environment variable `RUST_LOG` and the `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging. From the CLI or `RUST_LOG` the log file is not created;
    /// from the config file, logging stops and the file is closed once the
    /// config is loaded.
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
