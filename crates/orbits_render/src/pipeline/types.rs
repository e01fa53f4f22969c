//! GPU-compatible data types for the mesh pipeline
//!
//! These types are designed to match the shader layouts in `mesh.wgsl`
//! exactly. All types derive Pod and Zeroable for safe buffer uploads.

use bytemuck::{Pod, Zeroable};
use orbits_core::{Material, SphereMesh};
use orbits_math::{mat4, Mat4};

/// A mesh vertex with normal and texture coordinates
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Interleave a sphere's attribute streams
    pub fn from_sphere(mesh: &SphereMesh) -> Vec<MeshVertex> {
        mesh.positions
            .iter()
            .zip(&mesh.normals)
            .zip(&mesh.uvs)
            .map(|((p, n), uv)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: *uv,
            })
            .collect()
    }
}

/// Per-frame uniforms shared by every draw
/// Layout: 160 bytes total (must match mesh.wgsl FrameUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: Mat4,
    /// Projection matrix (64 bytes)
    pub projection_matrix: Mat4,
    /// Camera position in world space + environment intensity (16 bytes)
    pub camera_position: [f32; 3],
    pub env_intensity: f32,
    /// Ambient light color premultiplied by intensity; w unused (16 bytes)
    pub ambient: [f32; 4],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_matrix: mat4::IDENTITY,
            projection_matrix: mat4::IDENTITY,
            camera_position: [0.0, 0.0, 9.0],
            env_intensity: 1.0,
            ambient: [1.0, 1.0, 1.0, 0.0],
        }
    }
}

/// Per-object uniforms
/// Layout: 96 bytes total (must match mesh.wgsl ObjectUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Model (object to world) matrix
    pub model_matrix: Mat4,
    /// Base color with opacity folded into alpha
    pub base_color: [f32; 4],
    /// x = roughness, y = metalness, zw unused
    pub surface: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model_matrix: Mat4, material: &Material) -> Self {
        let [r, g, b, a] = material.base_color;
        Self {
            model_matrix,
            base_color: [r, g, b, a * material.opacity],
            surface: [material.roughness, material.metalness, 0.0, 0.0],
        }
    }
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self::new(mat4::IDENTITY, &Material::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_mesh_vertex_size() {
        // 3 floats position + 3 floats normal + 2 floats uv = 32 bytes
        assert_eq!(size_of::<MeshVertex>(), 32);
    }

    #[test]
    fn test_frame_uniforms_size() {
        // 2 matrices + vec3/f32 + vec4 = 160 bytes
        assert_eq!(size_of::<FrameUniforms>(), 160);
    }

    #[test]
    fn test_object_uniforms_size() {
        assert_eq!(size_of::<ObjectUniforms>(), 96);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<MeshVertex>(), 4);
        assert_eq!(std::mem::align_of::<FrameUniforms>(), 4);
        assert_eq!(std::mem::align_of::<ObjectUniforms>(), 4);
    }

    #[test]
    fn test_opacity_folds_into_alpha() {
        let material = Material::default().with_opacity(0.5);
        let uniforms = ObjectUniforms::new(mat4::IDENTITY, &material);
        assert_eq!(uniforms.base_color, [1.0, 1.0, 1.0, 0.5]);
        assert_eq!(uniforms.surface[0], 1.0);
        assert_eq!(uniforms.surface[1], 0.0);
    }

    #[test]
    fn test_from_sphere_interleaves() {
        let mesh = SphereMesh::new(1.0, 8, 6);
        let vertices = MeshVertex::from_sphere(&mesh);
        assert_eq!(vertices.len(), mesh.vertex_count());
        assert_eq!(vertices[0].position, mesh.positions[0].to_array());
        assert_eq!(vertices[5].uv, mesh.uvs[5]);
    }
}
