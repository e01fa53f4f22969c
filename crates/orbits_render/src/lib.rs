//! Orbits rendering library
//!
//! This crate provides the wgpu-based pipeline that draws the orbit scene:
//! textured spheres lit by ambient light and an equirectangular environment
//! map, with a translucent inside-out backdrop shell.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - Fixed perspective camera
//! - [`pipeline::MeshPipeline`] - Opaque and alpha-blended mesh pipelines
//! - [`renderable::SceneRenderables`] - Converts World/Entity to GPU buffers

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod renderable;

// Re-export core types for convenience
pub use orbits_core::{World, Entity, Material, EntityKey, FaceSide, TextureData};

pub use camera::Camera;
pub use renderable::{SceneRenderables, RenderableMesh, GpuGeometry};
