//! 3D Transform (position, rotation, scale)
//!
//! A Transform represents the local placement of an entity relative to its
//! parent (or the world origin for root entities).

use orbits_math::{mat4, Mat4, Vec3};
use serde::{Serialize, Deserialize};

/// A 3D transform with position, Euler rotation (XYZ order), and uniform scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Builder-style rotation setter
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local-to-parent matrix: translate * rotate * scale
    pub fn to_matrix(&self) -> Mat4 {
        let rotate_scale = mat4::mul(mat4::euler_xyz(self.rotation), mat4::scale(self.scale));
        mat4::mul(mat4::translation(self.position), rotate_scale)
    }

    /// Transform a point from local space to parent space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        mat4::transform_point(self.to_matrix(), p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::identity().to_matrix(), mat4::IDENTITY);
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let t = Transform {
            position: Vec3::new(0.0, 1.0, 0.0),
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
            scale: 2.0,
        };
        let p = t.transform_point(Vec3::X);
        // X scaled to 2, rotated about Y to -Z, then lifted by 1
        assert!((p - Vec3::new(0.0, 1.0, -2.0)).length() < 1e-5, "{:?}", p);
    }

    #[test]
    fn test_from_position() {
        let t = Transform::from_position(Vec3::new(4.4, 0.0, 0.0));
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.transform_point(Vec3::ZERO), Vec3::new(4.4, 0.0, 0.0));
    }
}
