//! Gesture input for the Orbits slideshow
//!
//! Wheel and touch input both reduce to a [`ScrollDirection`] through the
//! [`GestureNormalizer`]; a [`Debouncer`] then decides whether a forward
//! sample may advance the slideshow.

mod gesture;
mod debouncer;

pub use gesture::{GestureNormalizer, ScrollDirection};
pub use debouncer::{Debouncer, DEFAULT_COOLDOWN};
