use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};
use log::warn;

use crate::{
    layout::{FieldDesc, GpuStruct, gpu_fields},
    light::Light,
};

// The data we send to the GPU for every draw.
// normal_matrix is a float3x3: three columns, each padded to 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub model_matrix: Mat4,
    pub view_matrix: Mat4,
    pub projection_matrix: Mat4,
    pub normal_matrix: [[f32; 4]; 3],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY)
    }
}

impl Uniforms {
    /// Builds the per-draw payload, deriving the normal matrix from `model`.
    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model_matrix: model,
            view_matrix: view,
            projection_matrix: projection,
            normal_matrix: pack_mat3(normal_matrix_from(&model)),
        }
    }

    /// Replaces the model matrix and keeps the normal matrix in step with it.
    pub fn set_model(&mut self, model: Mat4) {
        self.model_matrix = model;
        self.normal_matrix = pack_mat3(normal_matrix_from(&model));
    }

    pub fn normal_matrix(&self) -> Mat3 {
        unpack_mat3(&self.normal_matrix)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }
}

impl GpuStruct for Uniforms {
    const SHADER_NAME: &'static str = "Uniforms";
    const FIELDS: &'static [FieldDesc] = gpu_fields!(Uniforms {
        model_matrix as "modelMatrix": Float4x4,
        view_matrix as "viewMatrix": Float4x4,
        projection_matrix as "projectionMatrix": Float4x4,
        normal_matrix as "normalMatrix": Float3x3,
    });
}

/// Inverse-transpose of the upper-left 3x3 block of `model`.
///
/// A singular block (zero scale on some axis) has no inverse; the identity is
/// returned instead so shading stays finite.
pub fn normal_matrix_from(model: &Mat4) -> Mat3 {
    let upper = Mat3::from_mat4(*model);
    let det = upper.determinant();
    if det.abs() <= f32::EPSILON || !det.is_finite() {
        warn!("model matrix is singular (det = {det}), using identity normal matrix");
        return Mat3::IDENTITY;
    }
    upper.inverse().transpose()
}

pub fn pack_mat3(m: Mat3) -> [[f32; 4]; 3] {
    [
        m.x_axis.extend(0.0).to_array(),
        m.y_axis.extend(0.0).to_array(),
        m.z_axis.extend(0.0).to_array(),
    ]
}

pub fn unpack_mat3(columns: &[[f32; 4]; 3]) -> Mat3 {
    let column = |c: &[f32; 4]| Vec3::new(c[0], c[1], c[2]);
    Mat3::from_cols(
        column(&columns[0]),
        column(&columns[1]),
        column(&columns[2]),
    )
}

/// Per-frame shading context.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FragmentUniforms {
    pub light_count: u32,
    _pad0: [u32; 3],
    pub camera_position: Vec3,
    _pad1: u32,
    /// How many times the base color texture repeats across the surface.
    pub tiling: u32,
    _pad2: [u32; 3],
}

impl Default for FragmentUniforms {
    fn default() -> Self {
        Self::new(0, Vec3::ZERO, 1)
    }
}

impl FragmentUniforms {
    pub fn new(light_count: u32, camera_position: Vec3, tiling: u32) -> Self {
        Self {
            light_count,
            _pad0: [0; 3],
            camera_position,
            _pad1: 0,
            tiling,
            _pad2: [0; 3],
        }
    }

    /// The prefix of `lights` a shader is allowed to read.
    ///
    /// With `light_count == 0` nothing is lit, whatever the array holds.
    pub fn active_lights<'a>(&self, lights: &'a [Light]) -> &'a [Light] {
        let count = self.light_count as usize;
        if count > lights.len() {
            warn!(
                "light_count is {count} but only {} lights were supplied",
                lights.len()
            );
        }
        &lights[..count.min(lights.len())]
    }
}

impl GpuStruct for FragmentUniforms {
    const SHADER_NAME: &'static str = "FragmentUniforms";
    const FIELDS: &'static [FieldDesc] = gpu_fields!(FragmentUniforms {
        light_count as "lightCount": Uint,
        camera_position as "cameraPosition": Float3,
        tiling as "tiling": Uint,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutRules, verify};
    use glam::Quat;

    fn assert_mat3_eq(a: Mat3, b: Mat3) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn uniforms_layout_matches_metal() {
        let layout = verify::<Uniforms>(LayoutRules::Metal).unwrap();
        assert_eq!(layout.size, 240);
        assert_eq!(layout.field("viewMatrix").unwrap().offset, 64);
        assert_eq!(layout.field("projectionMatrix").unwrap().offset, 128);
        assert_eq!(layout.field("normalMatrix").unwrap().offset, 192);
    }

    #[test]
    fn fragment_uniforms_layout_matches_metal() {
        let layout = verify::<FragmentUniforms>(LayoutRules::Metal).unwrap();
        assert_eq!(layout.size, 48);
        assert_eq!(layout.field("lightCount").unwrap().offset, 0);
        assert_eq!(layout.field("cameraPosition").unwrap().offset, 16);
        assert_eq!(layout.field("tiling").unwrap().offset, 32);
    }

    #[test]
    fn normal_matrix_is_inverse_transpose() {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 0.5, 1.0),
            Quat::from_rotation_y(0.7),
            Vec3::new(3.0, -1.0, 4.0),
        );
        let uniforms = Uniforms::new(model, Mat4::IDENTITY, Mat4::IDENTITY);
        let expected = Mat3::from_mat4(model).inverse().transpose();
        assert_mat3_eq(uniforms.normal_matrix(), expected);
    }

    #[test]
    fn rotation_only_model_keeps_rotation_as_normal_matrix() {
        let rotation = Quat::from_rotation_x(1.1);
        let model = Mat4::from_quat(rotation);
        assert_mat3_eq(normal_matrix_from(&model), Mat3::from_quat(rotation));
    }

    #[test]
    fn set_model_refreshes_normal_matrix() {
        let mut uniforms = Uniforms::default();
        assert_mat3_eq(uniforms.normal_matrix(), Mat3::IDENTITY);

        let model = Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0));
        uniforms.set_model(model);
        assert_mat3_eq(
            uniforms.normal_matrix(),
            Mat3::from_diagonal(Vec3::new(0.25, 1.0, 1.0)),
        );
    }

    #[test]
    fn singular_model_falls_back_to_identity() {
        let model = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(normal_matrix_from(&model), Mat3::IDENTITY);
    }

    #[test]
    fn normal_matrix_columns_are_padded_with_zero() {
        let packed = pack_mat3(Mat3::from_cols_array(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
        ]));
        assert_eq!(packed[0], [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(packed[2], [7.0, 8.0, 9.0, 0.0]);
    }

    #[test]
    fn zero_light_count_means_no_lighting() {
        let lights = [Light::default(), Light::pointlight(Vec3::ONE, Vec3::X)];
        let frame = FragmentUniforms::new(0, Vec3::ZERO, 1);
        assert!(frame.active_lights(&lights).is_empty());
    }

    #[test]
    fn light_count_limits_and_clamps_the_light_slice() {
        let lights = [Light::default(), Light::pointlight(Vec3::ONE, Vec3::X)];
        assert_eq!(
            FragmentUniforms::new(1, Vec3::ZERO, 1)
                .active_lights(&lights)
                .len(),
            1
        );
        assert_eq!(
            FragmentUniforms::new(9, Vec3::ZERO, 1)
                .active_lights(&lights)
                .len(),
            2
        );
    }

    #[test]
    fn fragment_uniform_bytes_place_fields_at_shader_offsets() {
        let frame = FragmentUniforms::new(3, Vec3::new(1.0, 2.0, 3.0), 16);
        let bytes = bytemuck::bytes_of(&frame);
        assert_eq!(bytes.len(), 48);
        assert_eq!(u32::from_ne_bytes(bytes[0..4].try_into().unwrap()), 3);
        assert_eq!(f32::from_ne_bytes(bytes[20..24].try_into().unwrap()), 2.0);
        assert_eq!(u32::from_ne_bytes(bytes[32..36].try_into().unwrap()), 16);
    }
}
