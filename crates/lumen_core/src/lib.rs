//! The memory contract shared by host code and shaders: per-draw and
//! per-frame payloads, the light descriptor, and the binding slot numbers.
//!
//! Every payload is `#[repr(C)]` + `Pod` with explicit padding so its bytes
//! can be uploaded as-is. [`layout::verify`] checks a host struct against a
//! shading language's alignment rules and [`codegen`] emits the matching
//! shader declarations.

pub mod camera;
pub mod codegen;
pub mod enums;
mod error;
pub mod layout;
pub mod light;
pub mod slots;
pub mod transform;
pub mod uniforms;
pub mod vertex;

pub use enums::ShaderEnum;
pub use error::{LayoutError, Result};
pub use layout::{GpuStruct, LayoutRules};
pub use light::{Light, LightType, MAX_LIGHTS, SpotCone};
pub use slots::{Attributes, BufferIndices, Textures};
pub use uniforms::{FragmentUniforms, Uniforms};

/// Checks every shared struct against `rules`.
pub fn verify_all(rules: LayoutRules) -> Result<Vec<layout::StructLayout>> {
    Ok(vec![
        layout::verify::<Uniforms>(rules)?,
        layout::verify::<Light>(rules)?,
        layout::verify::<FragmentUniforms>(rules)?,
    ])
}
