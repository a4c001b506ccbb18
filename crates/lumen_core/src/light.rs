use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::{
    enums::shader_enum,
    error::Result,
    layout::{FieldDesc, GpuStruct, gpu_fields},
};

/// Upper bound on the light array bound at `BufferIndices::Lights`.
pub const MAX_LIGHTS: usize = 64;

shader_enum! {
    /// Selects which `Light` fields a shader reads.
    pub enum LightType as "LightType" {
        Unused = 0 => "unused",
        Sunlight = 1 => "Sunlight",
        Spotlight = 2 => "Spotlight",
        Pointlight = 3 => "Pointlight",
        Ambientlight = 4 => "Ambientlight",
    }
}

/// A single light source as the fragment shader sees it.
///
/// `cone_*` fields are only meaningful for `LightType::Spotlight`; use
/// [`Light::spot_cone`] rather than reading them directly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Light {
    pub position: Vec3,
    _pad0: f32,
    pub color: Vec3,
    _pad1: f32,
    pub specular_color: Vec3,
    _pad2: f32,
    pub intensity: f32,
    _pad3: [f32; 3],
    /// Constant, linear and quadratic falloff coefficients.
    pub attenuation: Vec3,
    _pad4: f32,
    light_type: u32,
    /// Radians.
    pub cone_angle: f32,
    _pad5: [f32; 2],
    pub cone_direction: Vec3,
    _pad6: f32,
    pub cone_attenuation: f32,
    _pad7: [f32; 3],
}

/// The spotlight-only part of a `Light`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpotCone {
    pub angle: f32,
    pub direction: Vec3,
    pub attenuation: f32,
}

impl Default for Light {
    /// White sunlight at the origin, no distance falloff.
    fn default() -> Self {
        Self::with_type(LightType::Sunlight)
    }
}

impl Light {
    fn with_type(ty: LightType) -> Self {
        Self {
            position: Vec3::ZERO,
            _pad0: 0.0,
            color: Vec3::ONE,
            _pad1: 0.0,
            specular_color: Vec3::splat(0.6),
            _pad2: 0.0,
            intensity: 1.0,
            _pad3: [0.0; 3],
            attenuation: Vec3::X,
            _pad4: 0.0,
            light_type: ty.index(),
            cone_angle: 0.0,
            _pad5: [0.0; 2],
            cone_direction: Vec3::ZERO,
            _pad6: 0.0,
            cone_attenuation: 0.0,
            _pad7: [0.0; 3],
        }
    }

    pub fn sunlight(position: Vec3) -> Self {
        Self {
            position,
            ..Self::with_type(LightType::Sunlight)
        }
    }

    pub fn ambientlight(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            ..Self::with_type(LightType::Ambientlight)
        }
    }

    pub fn pointlight(position: Vec3, color: Vec3) -> Self {
        Self {
            position,
            color,
            ..Self::with_type(LightType::Pointlight)
        }
    }

    pub fn spotlight(position: Vec3, color: Vec3, cone: SpotCone) -> Self {
        Self {
            position,
            color,
            cone_angle: cone.angle,
            cone_direction: cone.direction,
            cone_attenuation: cone.attenuation,
            ..Self::with_type(LightType::Spotlight)
        }
    }

    pub fn with_attenuation(mut self, attenuation: Vec3) -> Self {
        self.attenuation = attenuation;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_specular(mut self, specular_color: Vec3) -> Self {
        self.specular_color = specular_color;
        self
    }

    /// Decodes the type tag. Fails only for bytes that did not come from
    /// one of the constructors (e.g. a buffer read back from the GPU).
    pub fn light_type(&self) -> Result<LightType> {
        LightType::try_from(self.light_type)
    }

    pub fn raw_light_type(&self) -> u32 {
        self.light_type
    }

    pub fn set_light_type(&mut self, ty: LightType) {
        self.light_type = ty.index();
    }

    /// The cone parameters, present only when this is a spotlight.
    pub fn spot_cone(&self) -> Option<SpotCone> {
        match self.light_type() {
            Ok(LightType::Spotlight) => Some(SpotCone {
                angle: self.cone_angle,
                direction: self.cone_direction,
                attenuation: self.cone_attenuation,
            }),
            _ => None,
        }
    }
}

impl GpuStruct for Light {
    const SHADER_NAME: &'static str = "Light";
    const FIELDS: &'static [FieldDesc] = gpu_fields!(Light {
        position as "position": Float3,
        color as "color": Float3,
        specular_color as "specularColor": Float3,
        intensity as "intensity": Float,
        attenuation as "attenuation": Float3,
        light_type as "type": Enum("LightType"),
        cone_angle as "coneAngle": Float,
        cone_direction as "coneDirection": Float3,
        cone_attenuation as "coneAttenuation": Float,
    });
}
