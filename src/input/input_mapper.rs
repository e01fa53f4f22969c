//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like Exit and ToggleFullscreen.
//! Wheel and touch input are NOT mapped here - they go through the gesture
//! normalizer so they share the slideshow's cool-down.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by special keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Forward gesture (Space, Down, PageDown)
    Advance,
}

/// Maps raw key events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for mapped keys, `None` for everything else
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::Space | KeyCode::ArrowDown | KeyCode::PageDown => Some(InputAction::Advance),
            _ => None,
        }
    }
}
