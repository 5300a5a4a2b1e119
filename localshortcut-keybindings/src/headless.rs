//! In-memory window runtime.
//!
//! Stands in for a real windowing system: windows are opened and closed by
//! hand and key events are delivered explicitly. Used by the `check`
//! command and by tests.

use crate::matcher::RawKeyEvent;
use crate::parser::ParseError;
use crate::registry::{ShortcutRegistry, WindowRuntime};
use localshortcut_config::RegisterOptions;
use std::fmt;

/// Identifier of a headless window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadlessWindowId(u64);

impl fmt::Display for HeadlessWindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Open headless windows, in creation order.
#[derive(Debug, Default)]
pub struct HeadlessWindows {
    next_id: u64,
    open: Vec<HeadlessWindowId>,
}

impl WindowRuntime for HeadlessWindows {
    type WindowId = HeadlessWindowId;

    fn list_windows(&self) -> Vec<HeadlessWindowId> {
        self.open.clone()
    }
}

/// Headless runtime owning its windows and the shortcut registry.
#[derive(Debug, Default)]
pub struct HeadlessRuntime {
    windows: HeadlessWindows,
    registry: ShortcutRegistry<HeadlessWindowId>,
}

impl HeadlessRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window. Shortcuts registered for all windows attach to it.
    pub fn open_window(&mut self) -> HeadlessWindowId {
        let id = HeadlessWindowId(self.windows.next_id);
        self.windows.next_id += 1;
        self.windows.open.push(id);
        self.registry.window_created(id);
        log::debug!("Opened headless {}", id);
        id
    }

    /// Close a window, dropping its shortcuts. Returns false if it was not open.
    pub fn close_window(&mut self, window: HeadlessWindowId) -> bool {
        let Some(pos) = self.windows.open.iter().position(|w| *w == window) else {
            return false;
        };
        self.windows.open.remove(pos);
        self.registry.window_destroyed(window);
        log::debug!("Closed headless {}", window);
        true
    }

    /// Register a shortcut on `window`, or on every present and future window.
    ///
    /// A closed `window` gets nothing attached.
    pub fn register<F>(
        &mut self,
        accelerator: &str,
        callback: F,
        options: RegisterOptions,
        window: Option<HeadlessWindowId>,
    ) -> Result<(), ParseError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.registry
            .register(&self.windows, accelerator, callback, options, window)
    }

    /// Deliver a key event to `window`. Returns the number of shortcuts fired.
    pub fn deliver(&self, window: HeadlessWindowId, event: &RawKeyEvent) -> usize {
        if !self.windows.open.contains(&window) {
            log::debug!("Dropping key event for closed {}", window);
            return 0;
        }
        self.registry.dispatch(window, event)
    }

    pub fn windows(&self) -> Vec<HeadlessWindowId> {
        self.windows.list_windows()
    }

    pub fn registry(&self) -> &ShortcutRegistry<HeadlessWindowId> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::EventFlags;

    #[test]
    fn test_window_ids_are_unique() {
        let mut runtime = HeadlessRuntime::new();
        let a = runtime.open_window();
        let b = runtime.open_window();
        assert_ne!(a, b);
        assert_eq!(runtime.windows(), vec![a, b]);
        assert_eq!(a.to_string(), "window-0");
    }

    #[test]
    fn test_close_window() {
        let mut runtime = HeadlessRuntime::new();
        let a = runtime.open_window();
        assert!(runtime.close_window(a));
        assert!(!runtime.close_window(a));
        assert!(runtime.windows().is_empty());
    }

    #[test]
    fn test_deliver_to_closed_window_fires_nothing() {
        let mut runtime = HeadlessRuntime::new();
        let a = runtime.open_window();
        runtime
            .register("A", || {}, RegisterOptions::default(), Some(a))
            .unwrap();
        runtime.close_window(a);

        let event = RawKeyEvent::key_down("a", EventFlags::empty());
        assert_eq!(runtime.deliver(a, &event), 0);
    }

    #[test]
    fn test_register_on_closed_window_attaches_nothing() {
        let mut runtime = HeadlessRuntime::new();
        let a = runtime.open_window();
        runtime.close_window(a);

        runtime
            .register("A", || {}, RegisterOptions::default(), Some(a))
            .unwrap();
        assert!(runtime.registry().is_empty());
        assert!(runtime.registry().shortcuts_for(a).is_empty());
    }
}
