//! Chat view state and the reducer that drives it.
//!
//! User gestures and backend completions both arrive as [`AppAction`]s.
//! Applying an action mutates [`App`] synchronously and may yield an
//! [`AppCommand`] describing backend work to start.

pub mod actions;
pub mod session;
pub mod ui_state;


pub use actions::{
    apply_action, apply_actions, mount_actions, AppAction, AppActionDispatcher, AppCommand,
};
pub use session::SessionContext;
pub use ui_state::{TranscriptScroll, UiState};

use crate::ui::picker::PickerState;

pub struct App {
    pub session: SessionContext,
    pub ui: UiState,
    pub picker: Option<PickerState>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            session: SessionContext::new(),
            ui: UiState::new(),
            picker: None,
        }
    }

    pub fn picker_state(&self) -> Option<&PickerState> {
        self.picker.as_ref()
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker.is_some()
    }
}
