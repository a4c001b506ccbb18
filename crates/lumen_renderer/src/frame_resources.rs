use std::mem::size_of;

use log::{debug, warn};
use lumen_core::{BufferIndices, FragmentUniforms, Light, Uniforms};
use wgpu::util::DeviceExt;

use crate::{bindings, error::RenderError};

/// Size in bytes of a light buffer holding `capacity` lights. Never zero so
/// the binding stays valid with an empty rig.
pub fn light_buffer_size(capacity: usize) -> wgpu::BufferAddress {
    (capacity.max(1) * size_of::<Light>()) as wgpu::BufferAddress
}

/// Fails when `count` lights would overrun a buffer sized for `capacity`.
pub fn check_light_capacity(count: usize, capacity: usize) -> Result<(), RenderError> {
    if count > capacity.max(1) {
        return Err(RenderError::TooManyLights {
            count,
            capacity: capacity.max(1),
        });
    }
    Ok(())
}

/// GPU buffers behind the frame bind group, one per `BufferIndices` slot
/// except the vertex stream.
pub struct FrameResources {
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    uniforms_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    fragment_buffer: wgpu::Buffer,
    light_capacity: usize,
}

impl FrameResources {
    pub fn new(device: &wgpu::Device, max_lights: usize) -> Self {
        let layout = bindings::create_frame_layout(device);

        let uniforms_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniforms Buffer"),
            contents: bytemuck::bytes_of(&Uniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Zeroed lights decode as `LightType::Unused`.
        let lights_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Lights Buffer"),
            size: light_buffer_size(max_lights),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let fragment_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Fragment Uniforms Buffer"),
            contents: bytemuck::bytes_of(&FragmentUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: BufferIndices::Uniforms.index(),
                    resource: uniforms_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: BufferIndices::Lights.index(),
                    resource: lights_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: BufferIndices::FragmentUniforms.index(),
                    resource: fragment_buffer.as_entire_binding(),
                },
            ],
        });

        debug!("frame resources created with room for {} lights", max_lights.max(1));

        Self {
            layout,
            bind_group,
            uniforms_buffer,
            lights_buffer,
            fragment_buffer,
            light_capacity: max_lights.max(1),
        }
    }

    pub fn light_capacity(&self) -> usize {
        self.light_capacity
    }

    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &Uniforms) {
        queue.write_buffer(&self.uniforms_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn write_lights(&self, queue: &wgpu::Queue, lights: &[Light]) -> Result<(), RenderError> {
        check_light_capacity(lights.len(), self.light_capacity)?;
        if lights.is_empty() {
            return Ok(());
        }
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(lights));
        debug!("uploaded {} lights", lights.len());
        Ok(())
    }

    pub fn write_fragment_uniforms(&self, queue: &wgpu::Queue, fragment: &FragmentUniforms) {
        if fragment.light_count as usize > self.light_capacity {
            warn!(
                "light_count {} exceeds the light buffer capacity {}",
                fragment.light_count, self.light_capacity
            );
        }
        queue.write_buffer(&self.fragment_buffer, 0, bytemuck::bytes_of(fragment));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_buffer_is_an_array_of_light_strides() {
        assert_eq!(light_buffer_size(4), 4 * 128);
        assert_eq!(light_buffer_size(0), 128);
    }

    #[test]
    fn capacity_is_enforced() {
        assert!(check_light_capacity(0, 4).is_ok());
        assert!(check_light_capacity(4, 4).is_ok());
        assert!(matches!(
            check_light_capacity(5, 4),
            Err(RenderError::TooManyLights {
                count: 5,
                capacity: 4
            })
        ));
    }
}
