//! Application systems
//!
//! Modular systems the application handler drives each frame.

pub mod animation;
pub mod slideshow;
mod render;
mod window;

pub use animation::{AnimationDriver, AnimatedProperty, FrameState, self_rotation};
pub use slideshow::{Slideshow, AdvanceOutcome};
pub use render::{RenderSystem, RenderError, drawable_size};
pub use window::{WindowSystem, WindowError, format_title};
