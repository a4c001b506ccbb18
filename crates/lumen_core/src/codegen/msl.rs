use super::{enumerants, line};
use crate::{
    enums::ShaderEnum,
    error::Result,
    layout::{GpuStruct, LayoutRules, ShaderType, verify},
    light::{Light, LightType},
    slots::{Attributes, BufferIndices, Textures},
    uniforms::{FragmentUniforms, Uniforms},
};

pub fn type_name(ty: ShaderType) -> &'static str {
    match ty {
        ShaderType::Float => "float",
        ShaderType::Uint => "uint",
        ShaderType::Int => "int",
        ShaderType::Float2 => "vector_float2",
        ShaderType::Float3 => "vector_float3",
        ShaderType::Float4 => "vector_float4",
        ShaderType::Float3x3 => "matrix_float3x3",
        ShaderType::Float4x4 => "matrix_float4x4",
        ShaderType::Enum(name) => name,
    }
}

pub fn typedef_enum<E: ShaderEnum>(out: &mut String) {
    line(out, "typedef enum {");
    let entries: Vec<String> = enumerants::<E>()
        .map(|(name, value)| format!("  {name} = {value}"))
        .collect();
    line(out, &entries.join(",\n"));
    line(out, &format!("}} {};", E::SHADER_NAME));
}

/// `simd` types already follow Metal rules, so no padding members are
/// emitted; the host struct is checked against those rules first.
pub fn typedef_struct<T: GpuStruct>(out: &mut String) -> Result<()> {
    let layout = verify::<T>(LayoutRules::Metal)?;
    line(out, "typedef struct {");
    for field in &layout.fields {
        line(
            out,
            &format!("  {} {};", type_name(field.ty), field.shader_name),
        );
    }
    line(out, &format!("}} {};", T::SHADER_NAME));
    Ok(())
}

/// The header shared by the Metal shaders and the host bridge.
pub fn common_header() -> Result<String> {
    let mut out = String::new();
    line(&mut out, "#ifndef Common_h");
    line(&mut out, "#define Common_h");
    line(&mut out, "");
    line(&mut out, "#import <simd/simd.h>");
    line(&mut out, "");

    typedef_struct::<Uniforms>(&mut out)?;
    line(&mut out, "");
    typedef_enum::<LightType>(&mut out);
    line(&mut out, "");
    typedef_struct::<Light>(&mut out)?;
    line(&mut out, "");
    typedef_struct::<FragmentUniforms>(&mut out)?;
    line(&mut out, "");
    typedef_enum::<Attributes>(&mut out);
    line(&mut out, "");
    typedef_enum::<Textures>(&mut out);
    line(&mut out, "");
    typedef_enum::<BufferIndices>(&mut out);
    line(&mut out, "");

    line(&mut out, "#endif /* Common_h */");
    Ok(out)
}
