//! Per-window shortcut registry.
//!
//! The registry owns every registration for the life of the process. A
//! shortcut registered without a target window is attached to each window
//! that exists at registration time and remembered so that windows created
//! later receive it too. There is no unregistration; a window's attachments
//! are dropped when the runtime reports the window destroyed.

use crate::matcher::{KeyPhase, MatchPolicy, RawKeyEvent, ShortcutMatcher};
use crate::parser::ParseError;
use localshortcut_config::RegisterOptions;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Callback fired when a shortcut matches. Takes no arguments.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// The window-enumeration side of a windowing runtime.
///
/// Window creation and key delivery are reported by the runtime calling
/// [`ShortcutRegistry::window_created`] and [`ShortcutRegistry::dispatch`].
pub trait WindowRuntime {
    type WindowId: Copy + Eq + Hash + fmt::Debug;

    /// Windows that are open right now.
    fn list_windows(&self) -> Vec<Self::WindowId>;
}

/// A single registration: the matcher built from the accelerator plus the
/// callback it fires.
pub struct Shortcut {
    accelerator: String,
    matcher: ShortcutMatcher,
    callback: Callback,
}

impl Shortcut {
    pub fn new(
        accelerator: &str,
        options: &RegisterOptions,
        callback: Callback,
    ) -> Result<Self, ParseError> {
        let matcher = ShortcutMatcher::parse(accelerator, MatchPolicy::from(options))?;
        Ok(Self {
            accelerator: accelerator.to_string(),
            matcher,
            callback,
        })
    }

    pub fn accelerator(&self) -> &str {
        &self.accelerator
    }

    pub fn matcher(&self) -> &ShortcutMatcher {
        &self.matcher
    }

    /// Fire the callback if `event` matches. Returns whether it fired.
    pub fn handle(&self, event: &RawKeyEvent) -> bool {
        if self.matcher.matches(event) {
            (self.callback)();
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shortcut")
            .field("accelerator", &self.accelerator)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// Registry of shortcuts attached to windows.
pub struct ShortcutRegistry<W> {
    /// Shortcuts attached to each open window, in registration order
    attached: HashMap<W, Vec<Arc<Shortcut>>>,
    /// Shortcuts every newly created window receives
    for_new_windows: Vec<Arc<Shortcut>>,
}

impl<W> Default for ShortcutRegistry<W> {
    fn default() -> Self {
        Self {
            attached: HashMap::new(),
            for_new_windows: Vec::new(),
        }
    }
}

impl<W> fmt::Debug for ShortcutRegistry<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutRegistry")
            .field("attached", &self.attached)
            .field("for_new_windows", &self.for_new_windows)
            .finish()
    }
}

impl<W> ShortcutRegistry<W>
where
    W: Copy + Eq + Hash + fmt::Debug,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `accelerator` to fire `callback`.
    ///
    /// With `window`, only that window is targeted; a window `runtime` does
    /// not list as open is skipped with a warning. Without it, the shortcut
    /// is attached to every window `runtime` lists now and to every window
    /// created afterwards.
    pub fn register<R, F>(
        &mut self,
        runtime: &R,
        accelerator: &str,
        callback: F,
        options: RegisterOptions,
        window: Option<W>,
    ) -> Result<(), ParseError>
    where
        R: WindowRuntime<WindowId = W> + ?Sized,
        F: Fn() + Send + Sync + 'static,
    {
        let policy = MatchPolicy::from(&options);
        let shortcut = match Shortcut::new(accelerator, &options, Arc::new(callback)) {
            Ok(shortcut) => Arc::new(shortcut),
            Err(e) => {
                log::warn!("Rejected shortcut '{}': {}", accelerator, e);
                return Err(e);
            }
        };

        match window {
            Some(window) if !runtime.list_windows().contains(&window) => {
                log::warn!(
                    "Shortcut {} targets window {:?} which is not open, skipping",
                    accelerator,
                    window
                );
            }
            Some(window) => {
                log::info!(
                    "Registered shortcut {} on window {:?} (policy: {:?})",
                    accelerator,
                    window,
                    policy
                );
                self.attach(window, shortcut);
            }
            None => {
                let windows = runtime.list_windows();
                log::info!(
                    "Registered shortcut {} on {} window(s) and all new windows (policy: {:?})",
                    accelerator,
                    windows.len(),
                    policy
                );
                for window in windows {
                    self.attach(window, Arc::clone(&shortcut));
                }
                self.for_new_windows.push(shortcut);
            }
        }

        Ok(())
    }

    fn attach(&mut self, window: W, shortcut: Arc<Shortcut>) {
        self.attached.entry(window).or_default().push(shortcut);
    }

    /// Attach every all-windows shortcut to a newly created window.
    pub fn window_created(&mut self, window: W) {
        if self.for_new_windows.is_empty() {
            return;
        }
        log::debug!(
            "Attaching {} shortcut(s) to new window {:?}",
            self.for_new_windows.len(),
            window
        );
        let shortcuts = self.for_new_windows.iter().cloned();
        self.attached.entry(window).or_default().extend(shortcuts);
    }

    /// Drop every shortcut attached to a destroyed window.
    pub fn window_destroyed(&mut self, window: W) {
        if let Some(dropped) = self.attached.remove(&window) {
            log::debug!(
                "Dropped {} shortcut(s) with window {:?}",
                dropped.len(),
                window
            );
        }
    }

    /// Deliver a key event for `window`.
    ///
    /// Fires the callback of every attached shortcut the event matches, in
    /// registration order. Returns how many fired.
    pub fn dispatch(&self, window: W, event: &RawKeyEvent) -> usize {
        if event.phase == KeyPhase::KeyUp {
            return 0;
        }
        let Some(shortcuts) = self.attached.get(&window) else {
            return 0;
        };

        let mut fired = 0;
        for shortcut in shortcuts {
            if shortcut.handle(event) {
                log::debug!(
                    "Shortcut {} fired on window {:?} (key={:?}, flags={})",
                    shortcut.accelerator(),
                    window,
                    event.key,
                    event.flags
                );
                fired += 1;
            }
        }
        fired
    }

    /// Shortcuts attached to `window`, in registration order.
    pub fn shortcuts_for(&self, window: W) -> &[Arc<Shortcut>] {
        self.attached
            .get(&window)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of shortcuts waiting for windows created later.
    pub fn future_count(&self) -> usize {
        self.for_new_windows.len()
    }

    /// Total number of window attachments.
    pub fn len(&self) -> usize {
        self.attached.values().map(Vec::len).sum()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.for_new_windows.is_empty()
    }
}
