//! Bind group layouts derived from the shared slot numbers.
//!
//! Group 0 holds the buffers: each entry's `binding` is the `BufferIndices`
//! value of the payload it carries. `BufferIndices::Vertices` is a vertex
//! buffer slot and never appears in a bind group.
//!
//! Group 1 holds the material: `Textures::BaseColorTexture` at its own value,
//! and the sampler right after the last texture slot.

use std::{mem::size_of, num::NonZeroU64};

use lumen_core::{BufferIndices, FragmentUniforms, Light, Textures, Uniforms};

pub const FRAME_GROUP: u32 = 0;
pub const MATERIAL_GROUP: u32 = 1;

/// Binding of the base color sampler inside the material group.
pub const BASE_COLOR_SAMPLER_BINDING: u32 = Textures::ALL.len() as u32;

fn min_size<T>() -> Option<NonZeroU64> {
    wgpu::BufferSize::new(size_of::<T>() as u64)
}

/// The buffer kind, visibility and minimum size bound at `slot`, or `None`
/// for the vertex stream.
pub fn buffer_entry(slot: BufferIndices) -> Option<wgpu::BindGroupLayoutEntry> {
    let (visibility, ty, min_binding_size) = match slot {
        BufferIndices::Vertices => return None,
        BufferIndices::Uniforms => (
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            wgpu::BufferBindingType::Uniform,
            min_size::<Uniforms>(),
        ),
        // Variable-length array: one element is the minimum.
        BufferIndices::Lights => (
            wgpu::ShaderStages::FRAGMENT,
            wgpu::BufferBindingType::Storage { read_only: true },
            min_size::<Light>(),
        ),
        BufferIndices::FragmentUniforms => (
            wgpu::ShaderStages::FRAGMENT,
            wgpu::BufferBindingType::Uniform,
            min_size::<FragmentUniforms>(),
        ),
    };

    Some(wgpu::BindGroupLayoutEntry {
        binding: slot.index(),
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty,
            has_dynamic_offset: false,
            min_binding_size,
        },
        count: None,
    })
}

pub fn frame_layout_entries() -> Vec<wgpu::BindGroupLayoutEntry> {
    BufferIndices::ALL
        .iter()
        .filter_map(|&slot| buffer_entry(slot))
        .collect()
}

pub fn material_layout_entries() -> Vec<wgpu::BindGroupLayoutEntry> {
    let mut entries: Vec<_> = Textures::ALL
        .iter()
        .map(|slot| wgpu::BindGroupLayoutEntry {
            binding: slot.index(),
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        })
        .collect();

    entries.push(wgpu::BindGroupLayoutEntry {
        binding: BASE_COLOR_SAMPLER_BINDING,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    });
    entries
}

pub fn create_frame_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Frame Bind Group Layout"),
        entries: &frame_layout_entries(),
    })
}

pub fn create_material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Material Bind Group Layout"),
        entries: &material_layout_entries(),
    })
}
