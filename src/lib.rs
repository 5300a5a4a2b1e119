// Library exports for testing and potential library use

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod cli;
pub mod debug;

pub mod config {
    //! Configuration re-exports from the `localshortcut-config` crate.
    pub use localshortcut_config::*;
}

pub mod keybindings {
    //! Shortcut system re-exports from the `localshortcut-keybindings` crate.
    pub use localshortcut_keybindings::*;
}
