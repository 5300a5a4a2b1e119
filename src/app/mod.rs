//! Application module for localshortcut
//!
//! This module contains the windowed demo, including:
//! - `App`: Entry point that loads config and runs the event loop
//! - `WindowManager`: Owns the open windows and the shortcut registry
//! - `handler`: winit `ApplicationHandler` impl feeding key events to the registry

use crate::cli::RuntimeOptions;
use anyhow::{Context, Result};
use localshortcut_config::ShortcutConfig;
use winit::event_loop::{ControlFlow, EventLoop};

pub mod handler;
pub mod window_manager;

pub use window_manager::WindowManager;

/// Main application entry point
pub struct App {
    config: ShortcutConfig,
}

impl App {
    /// Create a new application
    pub fn new(runtime_options: RuntimeOptions) -> Result<Self> {
        let mut config = match &runtime_options.config_path {
            Some(path) => ShortcutConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => ShortcutConfig::load()?,
        };

        if runtime_options.log_level.is_none() {
            crate::debug::apply_config_level(config.log_level.to_level_filter());
        }

        if let Some(windows) = runtime_options.windows {
            if windows == 0 {
                anyhow::bail!("--windows must be at least 1");
            }
            log::info!("CLI override: opening {} window(s)", windows);
            config.initial_windows = windows;
            config.validate()?;
        }

        Ok(Self { config })
    }

    /// Run the application
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut window_manager = WindowManager::new(self.config);

        event_loop.run_app(&mut window_manager)?;

        Ok(())
    }
}
