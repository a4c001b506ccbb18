//! Shader-side declarations generated from the host types, so the two sides
//! cannot drift apart by hand-editing.

pub mod msl;
pub mod wgsl;

use crate::{enums::ShaderEnum, layout::ShaderType};

/// Appends `line` and a newline.
fn line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// `name = value` pairs of an enum, in declaration order.
fn enumerants<E: ShaderEnum>() -> impl Iterator<Item = (&'static str, u32)> {
    E::variants().iter().map(|v| (v.shader_name(), v.index()))
}

/// Enum-typed fields are plain 32-bit integers wherever a language has no
/// matching enum type.
fn scalar_of(ty: ShaderType) -> ShaderType {
    match ty {
        ShaderType::Enum(_) => ShaderType::Uint,
        other => other,
    }
}
