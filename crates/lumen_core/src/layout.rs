//! Shader-side memory layout rules and the check that host structs obey them.
//!
//! A [`GpuStruct`] lists its shader-visible fields together with the byte
//! offsets the Rust compiler actually gave them. [`compute_layout`] places the
//! same fields the way a shading language would, and [`verify`] compares the
//! two field by field.

use std::fmt;

use log::debug;

use crate::error::{LayoutError, Result};

/// Field types that appear in the shared structs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderType {
    Float,
    Uint,
    Int,
    Float2,
    Float3,
    Float4,
    Float3x3,
    Float4x4,
    /// A 32-bit enumerant of the named shader enum.
    Enum(&'static str),
}

/// Alignment rules of a target shading language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutRules {
    /// Metal Shading Language / `simd` types: `float3` occupies 16 bytes.
    Metal,
    /// WGSL uniform/storage address space: `vec3<f32>` is 12 bytes with
    /// 16-byte alignment, so a following scalar packs into its tail.
    Wgsl,
}

impl LayoutRules {
    pub const ALL: [LayoutRules; 2] = [LayoutRules::Metal, LayoutRules::Wgsl];

    pub fn name(self) -> &'static str {
        match self {
            LayoutRules::Metal => "metal",
            LayoutRules::Wgsl => "wgsl",
        }
    }
}

impl ShaderType {
    pub const fn align(self, _rules: LayoutRules) -> usize {
        match self {
            ShaderType::Float | ShaderType::Uint | ShaderType::Int | ShaderType::Enum(_) => 4,
            ShaderType::Float2 => 8,
            ShaderType::Float3 | ShaderType::Float4 => 16,
            ShaderType::Float3x3 | ShaderType::Float4x4 => 16,
        }
    }

    pub const fn size(self, rules: LayoutRules) -> usize {
        match (self, rules) {
            (ShaderType::Float | ShaderType::Uint | ShaderType::Int | ShaderType::Enum(_), _) => 4,
            (ShaderType::Float2, _) => 8,
            (ShaderType::Float3, LayoutRules::Metal) => 16,
            (ShaderType::Float3, LayoutRules::Wgsl) => 12,
            (ShaderType::Float4, _) => 16,
            // Three columns, each padded out to a float4.
            (ShaderType::Float3x3, _) => 48,
            (ShaderType::Float4x4, _) => 64,
        }
    }
}

/// One shader-visible field of a host struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDesc {
    /// Rust field name.
    pub name: &'static str,
    /// Name of the same member in shader declarations.
    pub shader_name: &'static str,
    pub ty: ShaderType,
    /// `offset_of!` on the host struct.
    pub host_offset: usize,
}

/// A `Pod` struct whose bytes are uploaded verbatim and read by shaders.
///
/// `FIELDS` lists shader-visible members in declaration order; explicit
/// padding members of the Rust struct are left out.
pub trait GpuStruct: bytemuck::Pod {
    const SHADER_NAME: &'static str;
    const FIELDS: &'static [FieldDesc];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub shader_name: &'static str,
    pub ty: ShaderType,
    pub offset: usize,
    pub size: usize,
}

/// Where a shading language places each field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructLayout {
    pub name: &'static str,
    pub rules: LayoutRules,
    pub fields: Vec<FieldLayout>,
    pub size: usize,
    pub align: usize,
}

impl StructLayout {
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name || f.shader_name == name)
    }
}

impl fmt::Display for StructLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} rules): size {}, align {}",
            self.name,
            self.rules.name(),
            self.size,
            self.align
        )?;
        for field in &self.fields {
            writeln!(
                f,
                "  {:>4} {:>3}  {:<18} {:?}",
                field.offset, field.size, field.shader_name, field.ty
            )?;
        }
        Ok(())
    }
}

/// Builds a `&'static [FieldDesc]` from `field as "shaderName": Type` entries.
macro_rules! gpu_fields {
    ($ty:ty { $( $field:ident as $shader:literal : $kind:ident $(($arg:literal))? ),+ $(,)? }) => {
        &[
            $(
                $crate::layout::FieldDesc {
                    name: stringify!($field),
                    shader_name: $shader,
                    ty: $crate::layout::ShaderType::$kind $(($arg))?,
                    host_offset: ::std::mem::offset_of!($ty, $field),
                }
            ),+
        ]
    };
}

pub(crate) use gpu_fields;

pub const fn round_up(value: usize, align: usize) -> usize {
    value.div_ceil(align) * align
}

/// Places `fields` one after another following `rules`.
pub fn compute_layout(
    name: &'static str,
    fields: &[FieldDesc],
    rules: LayoutRules,
) -> StructLayout {
    let mut offset = 0;
    let mut align = 1;
    let mut placed = Vec::with_capacity(fields.len());

    for desc in fields {
        let field_align = desc.ty.align(rules);
        let size = desc.ty.size(rules);
        let at = round_up(offset, field_align);
        placed.push(FieldLayout {
            name: desc.name,
            shader_name: desc.shader_name,
            ty: desc.ty,
            offset: at,
            size,
        });
        offset = at + size;
        align = align.max(field_align);
    }

    StructLayout {
        name,
        rules,
        fields: placed,
        size: round_up(offset, align),
        align,
    }
}

/// Checks that the host layout of `T` is exactly what `rules` produce.
pub fn verify<T: GpuStruct>(rules: LayoutRules) -> Result<StructLayout> {
    let layout = compute_layout(T::SHADER_NAME, T::FIELDS, rules);

    for (desc, placed) in T::FIELDS.iter().zip(&layout.fields) {
        if desc.host_offset != placed.offset {
            return Err(LayoutError::OffsetMismatch {
                structure: T::SHADER_NAME,
                field: desc.shader_name,
                host: desc.host_offset,
                shader: placed.offset,
            });
        }
    }

    let host_size = std::mem::size_of::<T>();
    if host_size != layout.size {
        return Err(LayoutError::SizeMismatch {
            structure: T::SHADER_NAME,
            host: host_size,
            shader: layout.size,
        });
    }

    debug!(
        "{} matches {} layout ({} bytes)",
        T::SHADER_NAME,
        rules.name(),
        layout.size
    );
    Ok(layout)
}

/// A member of a shader struct declaration, including explicit padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Field(FieldLayout),
    /// A 4-byte scalar that only exists to push the next field to its host offset.
    Pad { index: usize, offset: usize },
}

/// Lays out `T` under `rules`, inserting 4-byte pad members wherever the rules
/// would pack a field tighter than the host struct does.
///
/// Fails when the rules place a field *later* than the host, which no amount
/// of padding can fix.
pub fn padded_layout<T: GpuStruct>(rules: LayoutRules) -> Result<Vec<Member>> {
    let mut members = Vec::with_capacity(T::FIELDS.len());
    let mut offset = 0;
    let mut align = 1;
    let mut pads = 0;

    for desc in T::FIELDS {
        let field_align = desc.ty.align(rules);
        align = align.max(field_align);

        while round_up(offset, field_align) < desc.host_offset {
            members.push(Member::Pad {
                index: pads,
                offset,
            });
            pads += 1;
            offset += 4;
        }

        let at = round_up(offset, field_align);
        if at != desc.host_offset {
            return Err(LayoutError::OffsetMismatch {
                structure: T::SHADER_NAME,
                field: desc.shader_name,
                host: desc.host_offset,
                shader: at,
            });
        }

        let size = desc.ty.size(rules);
        members.push(Member::Field(FieldLayout {
            name: desc.name,
            shader_name: desc.shader_name,
            ty: desc.ty,
            offset: at,
            size,
        }));
        offset = at + size;
    }

    let host_size = std::mem::size_of::<T>();
    while round_up(offset, align) < host_size {
        members.push(Member::Pad {
            index: pads,
            offset,
        });
        pads += 1;
        offset += 4;
    }

    let size = round_up(offset, align);
    if size != host_size {
        return Err(LayoutError::SizeMismatch {
            structure: T::SHADER_NAME,
            host: host_size,
            shader: size,
        });
    }

    Ok(members)
}
