//! Orbits - scroll-driven orbiting planets
//!
//! Library side of the application: configuration, scene construction, the
//! slideshow and animation state, and the window/render systems driven by the
//! binary's event loop.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
