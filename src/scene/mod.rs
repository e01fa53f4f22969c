//! Scene construction utilities
//!
//! This module provides a declarative API for building the orbit scene.

mod scene_builder;

pub use scene_builder::{SceneBuilder, SceneHandles, orbit_position, BODY_TAG, BACKDROP_TAG};
