//! 3D Mathematics Library
//!
//! This crate provides the vector, matrix, and mesh types for the Orbits scene.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for transformations
//!
//! ## Meshes
//!
//! - [`SphereMesh`] - UV sphere with normals and texture coordinates

mod vec3;
pub mod mat4;
pub mod sphere;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use sphere::SphereMesh;
