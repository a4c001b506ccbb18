use lumen_core::vertex::{VertexDescriptor, VertexFormat};

/// Owned attribute list for a `wgpu::VertexBufferLayout`, built from the
/// shared vertex descriptor. Shader locations are the `Attributes` values.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexLayout {
    pub array_stride: wgpu::BufferAddress,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

impl VertexLayout {
    pub fn buffer_layout(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}

fn format_of(format: VertexFormat) -> wgpu::VertexFormat {
    match format {
        VertexFormat::Float2 => wgpu::VertexFormat::Float32x2,
        VertexFormat::Float3 => wgpu::VertexFormat::Float32x3,
        VertexFormat::Float4 => wgpu::VertexFormat::Float32x4,
    }
}

pub fn vertex_buffer_layout(descriptor: &VertexDescriptor) -> VertexLayout {
    VertexLayout {
        array_stride: descriptor.stride as wgpu::BufferAddress,
        attributes: descriptor
            .attributes
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: format_of(a.format),
                offset: a.offset as wgpu::BufferAddress,
                shader_location: a.attribute.index(),
            })
            .collect(),
    }
}
