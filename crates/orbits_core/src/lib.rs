//! Core types for the Orbits scene
//!
//! This crate provides the foundational types for building and animating the
//! scene graph:
//!
//! - [`Transform`] - Position, Euler rotation, and scale in 3D space
//! - [`Material`] - Visual properties of an entity (color, opacity, texture)
//! - [`Entity`] - A node in the world with transform, mesh, and material
//! - [`World`] - Slotmap-backed container with parent links
//! - [`SceneDescription`] - Serializable layout of the orbit scene
//! - [`TextureData`] / [`EnvironmentMap`] - Decoded image assets
//! - [`AssetLoader`] - Background texture decoding over channels
//! - [`Timeline`] / [`Tween`] / [`Easing`] - Time-bounded property animation
//! - [`CancellationToken`] - Shared shutdown flag for the frame loop

mod transform;
mod entity;
mod world;
mod scene;
mod asset_error;
mod texture;
mod asset_loader;
pub mod tween;
mod cancellation;

pub use transform::Transform;
pub use entity::{Material, Entity, MeshRef, DirtyFlags, FaceSide};
pub use world::{World, EntityKey};
pub use scene::{SceneDescription, BodyDescription, SceneLoadError, SceneSaveError};
pub use asset_error::AssetError;
pub use texture::{Asset, TextureData, EnvironmentMap};
pub use asset_loader::{AssetLoader, LoadResult};
pub use tween::{Easing, Tween, Timeline};
pub use cancellation::CancellationToken;

// Re-export commonly used types from orbits_math for convenience
pub use orbits_math::{Vec3, Mat4, SphereMesh};
