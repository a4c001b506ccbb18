use log::debug;

use super::{enumerants, line, scalar_of};
use crate::{
    enums::ShaderEnum,
    error::Result,
    layout::{GpuStruct, LayoutRules, Member, ShaderType, padded_layout},
    light::{Light, LightType},
    slots::{Attributes, BufferIndices, Textures},
    uniforms::{FragmentUniforms, Uniforms},
};

/// Member names that collide with WGSL keywords or reserved words.
const RESERVED: &[&str] = &["type", "struct", "var", "let", "const", "fn", "uniform"];

pub fn type_name(ty: ShaderType) -> &'static str {
    match scalar_of(ty) {
        ShaderType::Float => "f32",
        ShaderType::Uint => "u32",
        ShaderType::Int => "i32",
        ShaderType::Float2 => "vec2<f32>",
        ShaderType::Float3 => "vec3<f32>",
        ShaderType::Float4 => "vec4<f32>",
        ShaderType::Float3x3 => "mat3x3<f32>",
        ShaderType::Float4x4 => "mat4x4<f32>",
        ShaderType::Enum(_) => "u32",
    }
}

/// `type` becomes `type_`, everything else passes through.
pub fn ident(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

pub fn enum_constants<E: ShaderEnum>(out: &mut String) {
    line(out, &format!("// {}", E::SHADER_NAME));
    for (name, value) in enumerants::<E>() {
        line(out, &format!("const {}: u32 = {}u;", ident(name), value));
    }
}

/// A struct declaration whose members land at the host offsets of `T`,
/// with explicit `_padN: u32` members where WGSL would pack tighter.
pub fn struct_decl<T: GpuStruct>(out: &mut String) -> Result<()> {
    let members = padded_layout::<T>(LayoutRules::Wgsl)?;
    line(out, &format!("struct {} {{", T::SHADER_NAME));
    for member in &members {
        match member {
            Member::Field(field) => line(
                out,
                &format!(
                    "    {}: {}, // offset {}",
                    ident(field.shader_name),
                    type_name(field.ty),
                    field.offset
                ),
            ),
            Member::Pad { index, offset } => {
                line(out, &format!("    _pad{index}: u32, // offset {offset}"))
            }
        }
    }
    line(out, "}");
    debug!(
        "emitted WGSL struct {} with {} members",
        T::SHADER_NAME,
        members.len()
    );
    Ok(())
}

/// Every enum as constants and every shared struct, ready to prepend to a
/// WGSL module.
pub fn prelude() -> Result<String> {
    let mut out = String::new();
    line(&mut out, "// Generated by lumen_core; do not edit by hand.");
    line(&mut out, "");

    enum_constants::<LightType>(&mut out);
    line(&mut out, "");
    enum_constants::<Attributes>(&mut out);
    line(&mut out, "");
    enum_constants::<Textures>(&mut out);
    line(&mut out, "");
    enum_constants::<BufferIndices>(&mut out);
    line(&mut out, "");

    struct_decl::<Uniforms>(&mut out)?;
    line(&mut out, "");
    struct_decl::<Light>(&mut out)?;
    line(&mut out, "");
    struct_decl::<FragmentUniforms>(&mut out)?;

    Ok(out)
}
