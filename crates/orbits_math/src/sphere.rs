//! UV sphere mesh generation
//!
//! Produces the same vertex layout as a latitude/longitude sphere: rings from
//! the north pole (+Y) to the south pole, each ring `width_segments + 1`
//! vertices wide so the texture seam gets its own column.

use crate::Vec3;
use std::f32::consts::{PI, TAU};

/// A triangle-indexed sphere with per-vertex normals and texture coordinates
#[derive(Clone, Debug)]
pub struct SphereMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Texture coordinates, `v = 0` at the north pole (top row of the image)
    pub uvs: Vec<[f32; 2]>,
    /// Counter-clockwise triangles when viewed from outside
    pub indices: Vec<u32>,
    radius: f32,
}

impl SphereMesh {
    /// Build a sphere with the given radius and segment counts
    ///
    /// Segment counts are clamped to the minimum that still encloses a volume
    /// (3 around, 2 from pole to pole).
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let ring = (width_segments + 1) as usize;
        let vertex_count = ring * (height_segments + 1) as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let (sin_theta, cos_theta) = (v * PI).sin_cos();

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let (sin_phi, cos_phi) = (u * TAU).sin_cos();

                let normal = Vec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
                positions.push(normal * radius);
                normals.push(normal);
                uvs.push([u, v]);
            }
        }

        let mut indices = Vec::with_capacity(Self::triangles_for(width_segments, height_segments) * 3);
        for iy in 0..height_segments as usize {
            for ix in 0..width_segments as usize {
                let a = (iy * ring + ix + 1) as u32;
                let b = (iy * ring + ix) as u32;
                let c = ((iy + 1) * ring + ix) as u32;
                let d = ((iy + 1) * ring + ix + 1) as u32;

                // The pole rows collapse to a single triangle per quad
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments as usize - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            positions,
            normals,
            uvs,
            indices,
            radius,
        }
    }

    fn triangles_for(width_segments: u32, height_segments: u32) -> usize {
        2 * width_segments as usize * (height_segments as usize - 1)
    }

    /// Radius the sphere was built with
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_and_triangle_counts() {
        let mesh = SphereMesh::new(1.4, 64, 64);
        assert_eq!(mesh.vertex_count(), 65 * 65);
        assert_eq!(mesh.triangle_count(), 2 * 64 * 63);
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
    }

    #[test]
    fn test_vertices_lie_on_sphere() {
        let mesh = SphereMesh::new(50.0, 65, 65);
        for p in &mesh.positions {
            assert!((p.length() - 50.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_poles_and_uv_orientation() {
        let mesh = SphereMesh::new(2.0, 8, 4);
        // First ring is the north pole with v = 0
        assert!((mesh.positions[0].y - 2.0).abs() < 1e-5);
        assert_eq!(mesh.uvs[0][1], 0.0);
        // Last ring is the south pole with v = 1
        let last = mesh.vertex_count() - 1;
        assert!((mesh.positions[last].y + 2.0).abs() < 1e-5);
        assert_eq!(mesh.uvs[last][1], 1.0);
    }

    #[test]
    fn test_indices_in_range() {
        let mesh = SphereMesh::new(1.0, 12, 6);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_winding_faces_outward() {
        let mesh = SphereMesh::new(1.0, 16, 8);
        for tri in mesh.indices.chunks(3) {
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) * (1.0 / 3.0);
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_segment_counts_clamped() {
        let mesh = SphereMesh::new(1.0, 0, 0);
        assert_eq!(mesh.vertex_count(), 4 * 3);
        assert_eq!(mesh.triangle_count(), 2 * 3);
        assert_eq!(mesh.radius(), 1.0);
    }
}
