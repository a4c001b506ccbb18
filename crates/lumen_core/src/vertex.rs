//! Vertex stream description: which attribute lives at which location and
//! byte offset inside the buffer bound at `BufferIndices::Vertices`.

use bytemuck::{Pod, Zeroable};

use crate::slots::{Attributes, BufferIndices};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    Float2,
    Float3,
    Float4,
}

/// How attribute offsets advance through an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexPacking {
    /// Each attribute takes exactly its component bytes (12 for a float3).
    #[default]
    Tight,
    /// Attributes advance by the `simd` stride (16 for a float3).
    Simd,
}

impl VertexFormat {
    pub const fn size(self) -> u32 {
        match self {
            VertexFormat::Float2 => 8,
            VertexFormat::Float3 => 12,
            VertexFormat::Float4 => 16,
        }
    }

    pub const fn stride(self, packing: VertexPacking) -> u32 {
        match (self, packing) {
            (VertexFormat::Float3, VertexPacking::Simd) => 16,
            _ => self.size(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttributeDesc {
    pub attribute: Attributes,
    pub format: VertexFormat,
    pub offset: u32,
    pub buffer: BufferIndices,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexDescriptor {
    pub attributes: Vec<VertexAttributeDesc>,
    pub stride: u32,
    pub packing: VertexPacking,
}

impl VertexDescriptor {
    pub fn new(packing: VertexPacking) -> Self {
        Self {
            attributes: Vec::new(),
            stride: 0,
            packing,
        }
    }

    /// Appends an attribute right after the previous one.
    pub fn push(mut self, attribute: Attributes, format: VertexFormat) -> Self {
        self.attributes.push(VertexAttributeDesc {
            attribute,
            format,
            offset: self.stride,
            buffer: BufferIndices::Vertices,
        });
        self.stride += format.stride(self.packing);
        self
    }

    /// Position, normal and texture coordinates interleaved in one buffer.
    pub fn standard(packing: VertexPacking) -> Self {
        Self::new(packing)
            .push(Attributes::Position, VertexFormat::Float3)
            .push(Attributes::Normal, VertexFormat::Float3)
            .push(Attributes::UV, VertexFormat::Float2)
    }

    pub fn attribute(&self, attribute: Attributes) -> Option<&VertexAttributeDesc> {
        self.attributes.iter().find(|a| a.attribute == attribute)
    }
}

/// Interleaved vertex matching `VertexDescriptor::standard(VertexPacking::Tight)`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}
