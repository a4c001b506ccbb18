use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::{camera::ArcballCamera, uniforms::Uniforms};

/// Placement of a model in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    /// Rotation given as XYZ Euler angles in degrees.
    pub fn from_euler_degrees(degrees: Vec3) -> Self {
        Self {
            rotation: Quat::from_euler(
                EulerRot::XYZ,
                degrees.x.to_radians(),
                degrees.y.to_radians(),
                degrees.z.to_radians(),
            ),
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotates the object around the Y axis (Global Up)
    pub fn rotate_y(&mut self, angle_radians: f32) {
        self.rotation = Quat::from_rotation_y(angle_radians) * self.rotation;
    }

    /// Model matrix (local -> world).
    pub fn compute_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// The per-draw payload for this model seen through `camera`.
    pub fn uniforms(&self, camera: &ArcballCamera) -> Uniforms {
        Uniforms::new(
            self.compute_matrix(),
            camera.view_matrix(),
            camera.projection_matrix(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_applies_scale_then_rotation_then_translation() {
        let mut transform = Transform::from_xyz(1.0, 0.0, 0.0).with_scale(Vec3::splat(2.0));
        transform.rotate_y(std::f32::consts::FRAC_PI_2);
        let p = transform.compute_matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 0.0, -2.0), 1e-5));
    }

    #[test]
    fn uniforms_carry_camera_matrices() {
        let camera = ArcballCamera::new(Vec3::ZERO, 3.0);
        let uniforms = Transform::from_euler_degrees(Vec3::new(0.0, 45.0, 0.0)).uniforms(&camera);
        assert_eq!(uniforms.view_matrix, camera.view_matrix());
        assert_eq!(uniforms.projection_matrix, camera.projection_matrix());
    }
}
