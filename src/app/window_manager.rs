//! Window manager for the demo application.
//!
//! Owns every open window and the shortcut registry. Configured shortcuts
//! are registered once the initial windows exist; callbacks only queue
//! their action, which is applied after the key event has been dispatched.

use localshortcut_config::{ShortcutAction, ShortcutBinding, ShortcutConfig};
use localshortcut_keybindings::{RawKeyEvent, ShortcutRegistry, WindowRuntime};
use parking_lot::Mutex;
use std::sync::Arc;
use winit::event::Modifiers;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

/// Per-window state.
pub struct OpenWindow {
    pub window: Window,
    /// Current modifier state, updated from `ModifiersChanged`
    pub modifiers: Modifiers,
    /// 1-based number shown in the title
    pub number: usize,
}

/// Open windows in creation order.
#[derive(Default)]
pub struct OpenWindows {
    windows: Vec<OpenWindow>,
}

impl OpenWindows {
    pub fn get(&self, id: WindowId) -> Option<&OpenWindow> {
        self.windows.iter().find(|w| w.window.id() == id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut OpenWindow> {
        self.windows.iter_mut().find(|w| w.window.id() == id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

impl WindowRuntime for OpenWindows {
    type WindowId = WindowId;

    fn list_windows(&self) -> Vec<WindowId> {
        self.windows.iter().map(|w| w.window.id()).collect()
    }
}

/// A fired shortcut waiting to be applied.
#[derive(Debug, Clone)]
pub struct PendingAction {
    pub accelerator: String,
    pub action: ShortcutAction,
}

/// Manages windows and routes their key events to the registry.
pub struct WindowManager {
    pub(crate) config: ShortcutConfig,
    pub(crate) windows: OpenWindows,
    pub(crate) registry: ShortcutRegistry<WindowId>,
    pending: Arc<Mutex<Vec<PendingAction>>>,
    /// Total windows created, used for numbering
    created: usize,
    pub(crate) startup_done: bool,
}

impl WindowManager {
    pub fn new(config: ShortcutConfig) -> Self {
        Self {
            config,
            windows: OpenWindows::default(),
            registry: ShortcutRegistry::new(),
            pending: Arc::new(Mutex::new(Vec::new())),
            created: 0,
            startup_done: false,
        }
    }

    /// Open the initial windows, then register the configured shortcuts.
    pub fn startup(&mut self, event_loop: &ActiveEventLoop) {
        self.startup_done = true;

        let mut initial = Vec::with_capacity(self.config.initial_windows);
        for _ in 0..self.config.initial_windows {
            if let Some(id) = self.create_window(event_loop) {
                initial.push(id);
            }
        }
        if initial.is_empty() {
            log::error!("No window could be created, exiting");
            event_loop.exit();
            return;
        }

        let bindings = self.config.shortcuts.clone();
        let mut registered = 0;
        for binding in &bindings {
            if self.register_binding(binding, &initial) {
                registered += 1;
            }
        }
        log::info!(
            "Registered {} of {} configured shortcut(s)",
            registered,
            bindings.len()
        );
    }

    /// Register one configured shortcut. Invalid ones are logged and skipped.
    fn register_binding(&mut self, binding: &ShortcutBinding, initial: &[WindowId]) -> bool {
        let target = match binding.window {
            Some(index) => match initial.get(index) {
                Some(id) => Some(*id),
                None => {
                    log::warn!(
                        "Shortcut '{}' targets window {} which was not created, skipping",
                        binding.accelerator,
                        index
                    );
                    return false;
                }
            },
            None => None,
        };

        let pending = Arc::clone(&self.pending);
        let accelerator = binding.accelerator.clone();
        let action = binding.action;
        let callback = move || {
            pending.lock().push(PendingAction {
                accelerator: accelerator.clone(),
                action,
            });
        };

        match self.registry.register(
            &self.windows,
            &binding.accelerator,
            callback,
            binding.options(),
            target,
        ) {
            Ok(()) => true,
            Err(e) => {
                log::warn!(
                    "Invalid shortcut '{}' for action {:?}: {}",
                    binding.accelerator,
                    binding.action,
                    e
                );
                false
            }
        }
    }

    /// Create a window and attach the all-window shortcuts to it.
    pub fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Option<WindowId> {
        let number = self.created + 1;
        let title = format!("{} [{}]", self.config.window_title, number);
        let attrs = Window::default_attributes()
            .with_title(&title)
            .with_inner_size(winit::dpi::LogicalSize::new(480.0, 320.0));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let id = window.id();
                self.created = number;
                self.windows.windows.push(OpenWindow {
                    window,
                    modifiers: Modifiers::default(),
                    number,
                });
                self.registry.window_created(id);
                log::info!("Created window {:?} ({})", id, title);
                Some(id)
            }
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                None
            }
        }
    }

    /// Close a window and drop its shortcuts. Exits when the last one closes.
    pub fn close_window(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        if let Some(pos) = self.windows.windows.iter().position(|w| w.window.id() == id) {
            self.windows.windows.remove(pos);
            self.registry.window_destroyed(id);
            log::info!(
                "Closing window {:?} (remaining: {})",
                id,
                self.windows.len()
            );
        }

        if self.windows.is_empty() {
            log::info!("Last window closed, exiting application");
            event_loop.exit();
        }
    }

    /// Deliver a key event to the registry and apply any fired actions.
    pub fn handle_key_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        id: WindowId,
        event: &RawKeyEvent,
    ) {
        let fired = self.registry.dispatch(id, event);
        if fired > 0 {
            log::debug!("{} shortcut(s) fired for {:?}", fired, event.key);
        }
        self.apply_pending(event_loop, id);
    }

    fn apply_pending(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        let actions: Vec<PendingAction> = std::mem::take(&mut *self.pending.lock());

        for pending in actions {
            match pending.action {
                ShortcutAction::Log => {
                    let number = self.windows.get(id).map(|w| w.number).unwrap_or_default();
                    println!("{} pressed in window {}", pending.accelerator, number);
                    log::info!("Shortcut {} fired in window {:?}", pending.accelerator, id);
                }
                ShortcutAction::NewWindow => {
                    self.create_window(event_loop);
                }
                ShortcutAction::CloseWindow => {
                    self.close_window(event_loop, id);
                }
                ShortcutAction::Quit => {
                    log::info!("Quit requested by {}", pending.accelerator);
                    event_loop.exit();
                }
            }
        }
    }
}
