//! Rendering pipeline components
//!
//! One render pipeline variant per face side and blend mode, plus the GPU
//! data types and texture helpers they consume.

pub mod types;
pub mod textures;
pub mod mesh_pipeline;

pub use types::{MeshVertex, FrameUniforms, ObjectUniforms};
pub use textures::{GpuTexture, create_sampler, fit_to_limit, COLOR_TEXTURE_FORMAT};
pub use mesh_pipeline::{MeshPipeline, PipelineKey, DEPTH_FORMAT};
