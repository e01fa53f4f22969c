//! Perspective camera

use orbits_math::{mat4, Mat4, Vec3};

/// Fixed perspective camera looking at a target point
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 9.0),
            target: Vec3::ZERO,
            fov_y: 25.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn new(position: Vec3, fov_y: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            fov_y,
            near,
            far,
        }
    }

    /// World to view space
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.target, Vec3::Y)
    }

    /// View to clip space for the given aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov_y.to_radians(), aspect.max(f32::EPSILON), self.near, self.far)
    }

    /// Distance from the camera to a world-space point
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (point - self.position).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_scene() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 9.0));
        assert_eq!(camera.fov_y, 25.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
    }

    #[test]
    fn test_origin_lands_in_front_of_camera() {
        let camera = Camera::default();
        let view_pos = mat4::transform_point(camera.view_matrix(), Vec3::ZERO);
        assert!((view_pos.z + 9.0).abs() < 1e-5);
        assert!(view_pos.x.abs() < 1e-6);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = Camera::default();
        let proj = camera.projection_matrix(16.0 / 9.0);
        let clip_depth = |z: f32| {
            let clip_z = proj[2][2] * z + proj[3][2];
            let clip_w = proj[2][3] * z;
            clip_z / clip_w
        };
        assert!(clip_depth(-camera.near).abs() < 1e-5);
        assert!((clip_depth(-camera.far) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_aspect_scales_x() {
        let camera = Camera::default();
        let wide = camera.projection_matrix(2.0);
        let square = camera.projection_matrix(1.0);
        assert!((wide[0][0] * 2.0 - square[0][0]).abs() < 1e-5);
        assert_eq!(wide[1][1], square[1][1]);
    }

    #[test]
    fn test_distance_to() {
        let camera = Camera::default();
        assert!((camera.distance_to(Vec3::ZERO) - 9.0).abs() < 1e-6);
    }
}
