//! `ApplicationHandler` impl for `WindowManager`.

use crate::app::window_manager::WindowManager;
use localshortcut_keybindings::platform;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

impl ApplicationHandler for WindowManager {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.startup_done {
            self.startup(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_window(event_loop, window_id);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                if let Some(state) = self.windows.get_mut(window_id) {
                    state.modifiers = modifiers;
                }
            }
            WindowEvent::KeyboardInput {
                event,
                is_synthetic,
                ..
            } => {
                // Synthetic presses are replayed on focus change, not typed
                if is_synthetic {
                    return;
                }
                let Some(state) = self.windows.get(window_id) else {
                    return;
                };
                let Some(raw) = platform::raw_key_event(&event, &state.modifiers) else {
                    log::trace!("Ignoring key without a name: {:?}", event.logical_key);
                    return;
                };
                self.handle_key_event(event_loop, window_id, &raw);
            }
            _ => {}
        }
    }
}
