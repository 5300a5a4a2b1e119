//! Configuration system for localshortcut.
//!
//! Provides the options passed when registering a shortcut and the YAML
//! config file listing shortcuts to register at startup.

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::ShortcutConfig;
pub use error::ConfigError;
pub use types::{LogLevel, RegisterOptions, ShortcutAction, ShortcutBinding};
