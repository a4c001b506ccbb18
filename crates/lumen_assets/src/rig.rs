use std::{collections::BTreeMap, path::Path};

use glam::{Vec2, Vec3};
use log::{info, warn};
use lumen_core::{
    FragmentUniforms, Light, MAX_LIGHTS, SpotCone, camera::ArcballCamera,
};
use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Optional shading overrides shared by every light kind. Missing values keep
/// the defaults of the matching `Light` constructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shading {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular_color: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
    /// Constant, linear, quadratic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attenuation: Option<[f32; 3]>,
    /// Keys no light kind understands, usually misspellings.
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightDesc {
    Sunlight {
        #[serde(default)]
        position: [f32; 3],
        #[serde(flatten)]
        shading: Shading,
    },
    Ambientlight {
        #[serde(flatten)]
        shading: Shading,
    },
    Pointlight {
        position: [f32; 3],
        #[serde(flatten)]
        shading: Shading,
    },
    Spotlight {
        position: [f32; 3],
        cone_direction: [f32; 3],
        cone_angle_degrees: f32,
        cone_attenuation: f32,
        #[serde(flatten)]
        shading: Shading,
    },
}

impl LightDesc {
    pub fn shading(&self) -> &Shading {
        match self {
            LightDesc::Sunlight { shading, .. }
            | LightDesc::Ambientlight { shading }
            | LightDesc::Pointlight { shading, .. }
            | LightDesc::Spotlight { shading, .. } => shading,
        }
    }

    /// Keys of this entry that were ignored while parsing.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.shading().unknown.keys().map(String::as_str)
    }

    fn validate(&self, index: usize) -> Result<(), AssetError> {
        for key in self.unknown_keys() {
            warn!("light {index}: ignoring unknown key `{key}`");
        }

        if let Some(intensity) = self.shading().intensity {
            if !intensity.is_finite() || intensity < 0.0 {
                return Err(AssetError::invalid_light(
                    index,
                    format!("intensity {intensity} must be finite and non-negative"),
                ));
            }
        }

        if let LightDesc::Spotlight {
            cone_direction,
            cone_angle_degrees,
            ..
        } = self
        {
            if Vec3::from_array(*cone_direction).length_squared() == 0.0 {
                return Err(AssetError::invalid_light(
                    index,
                    "spotlight cone direction is zero",
                ));
            }
            if !(0.0..=180.0).contains(cone_angle_degrees) {
                return Err(AssetError::invalid_light(
                    index,
                    format!("cone angle {cone_angle_degrees} is outside 0..=180 degrees"),
                ));
            }
        }

        Ok(())
    }

    pub fn to_light(&self) -> Light {
        let base = match self {
            LightDesc::Sunlight { position, .. } => Light::sunlight(Vec3::from_array(*position)),
            LightDesc::Ambientlight { .. } => Light::ambientlight(Vec3::ONE, 1.0),
            LightDesc::Pointlight { position, .. } => {
                Light::pointlight(Vec3::from_array(*position), Vec3::ONE)
            }
            LightDesc::Spotlight {
                position,
                cone_direction,
                cone_angle_degrees,
                cone_attenuation,
                ..
            } => Light::spotlight(
                Vec3::from_array(*position),
                Vec3::ONE,
                SpotCone {
                    angle: cone_angle_degrees.to_radians(),
                    direction: Vec3::from_array(*cone_direction),
                    attenuation: *cone_attenuation,
                },
            ),
        };

        let shading = self.shading();
        let mut light = base;
        if let Some(color) = shading.color {
            light.color = Vec3::from_array(color);
        }
        if let Some(specular) = shading.specular_color {
            light.specular_color = Vec3::from_array(specular);
        }
        if let Some(intensity) = shading.intensity {
            light.intensity = intensity;
        }
        if let Some(attenuation) = shading.attenuation {
            light.attenuation = Vec3::from_array(attenuation);
        }
        light
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub target: [f32; 3],
    pub distance: f32,
    pub fov_degrees: f32,
    pub pitch_degrees: f32,
    pub yaw_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = ArcballCamera::default();
        Self {
            target: camera.target.to_array(),
            distance: camera.distance,
            fov_degrees: camera.fov.to_degrees(),
            pitch_degrees: 0.0,
            yaw_degrees: 0.0,
        }
    }
}

impl CameraConfig {
    pub fn to_camera(&self) -> ArcballCamera {
        let mut camera = ArcballCamera::new(Vec3::from_array(self.target), self.distance);
        camera.fov = self.fov_degrees.to_radians();
        camera.rotation = Vec2::new(self.pitch_degrees.to_radians(), self.yaw_degrees.to_radians());
        // Route through rotate() so the pitch clamp applies.
        camera.rotate(Vec2::ZERO);
        camera
    }
}

fn default_tiling() -> u32 {
    1
}

/// A scene's lights plus the per-frame settings that go with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRig {
    #[serde(default = "default_tiling")]
    pub tiling: u32,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            tiling: default_tiling(),
            camera: CameraConfig::default(),
            lights: Vec::new(),
        }
    }
}

impl LightRig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rig = Self::from_json(&text)?;
        info!(
            "loaded light rig {}: {} lights, tiling {}",
            path.display(),
            rig.lights.len(),
            rig.tiling
        );
        Ok(rig)
    }

    pub fn from_json(text: &str) -> Result<Self, AssetError> {
        let rig: LightRig = serde_json::from_str(text)?;
        rig.validate()?;
        Ok(rig)
    }

    pub fn to_json(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), AssetError> {
        if self.tiling == 0 {
            return Err(AssetError::InvalidTiling);
        }
        if self.lights.len() > MAX_LIGHTS {
            return Err(AssetError::TooManyLights {
                count: self.lights.len(),
                max: MAX_LIGHTS,
            });
        }
        for (index, light) in self.lights.iter().enumerate() {
            light.validate(index)?;
        }
        Ok(())
    }

    /// The array uploaded at `BufferIndices::Lights`.
    pub fn lights(&self) -> Vec<Light> {
        self.lights.iter().map(LightDesc::to_light).collect()
    }

    pub fn fragment_uniforms(&self, camera_position: Vec3) -> FragmentUniforms {
        FragmentUniforms::new(self.lights.len() as u32, camera_position, self.tiling)
    }

    /// Sun, soft ambient fill, a red point light and a magenta spotlight.
    pub fn showcase() -> Self {
        Self {
            tiling: 16,
            camera: CameraConfig {
                distance: 3.0,
                pitch_degrees: 20.0,
                ..Default::default()
            },
            lights: vec![
                LightDesc::Sunlight {
                    position: [1.0, 2.0, -2.0],
                    shading: Shading::default(),
                },
                LightDesc::Ambientlight {
                    shading: Shading {
                        color: Some([0.5, 1.0, 0.0]),
                        intensity: Some(0.1),
                        ..Default::default()
                    },
                },
                LightDesc::Pointlight {
                    position: [0.0, 0.5, -0.5],
                    shading: Shading {
                        color: Some([1.0, 0.0, 0.0]),
                        attenuation: Some([1.0, 3.0, 4.0]),
                        ..Default::default()
                    },
                },
                LightDesc::Spotlight {
                    position: [0.4, 0.8, 1.0],
                    cone_direction: [-2.0, 0.0, -1.5],
                    cone_angle_degrees: 40.0,
                    cone_attenuation: 12.0,
                    shading: Shading {
                        color: Some([1.0, 0.0, 1.0]),
                        attenuation: Some([1.0, 0.5, 0.0]),
                        ..Default::default()
                    },
                },
            ],
        }
    }
}
