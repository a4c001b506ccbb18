//! Runs against a real device. Every test returns early when no adapter is
//! available, so these pass on machines without a GPU or software rasterizer.

use glam::Vec3;
use lumen_assets::LightRig;
use lumen_core::{FragmentUniforms, Light, MAX_LIGHTS, Uniforms};
use lumen_renderer::{BaseColorTexture, FrameResources, GpuContext, RenderError, bindings};

fn gpu() -> Option<GpuContext> {
    match GpuContext::headless() {
        Ok(gpu) => Some(gpu),
        Err(err) => {
            eprintln!("skipping, no headless device: {err}");
            None
        }
    }
}

#[test]
fn frame_resources_accept_payloads_up_to_capacity() {
    let Some(gpu) = gpu() else { return };
    let frame = FrameResources::new(&gpu.device, 2);
    assert_eq!(frame.light_capacity(), 2);

    let lights = [
        Light::sunlight(Vec3::new(1.0, 2.0, -2.0)),
        Light::pointlight(Vec3::Y, Vec3::X),
    ];
    frame.write_uniforms(&gpu.queue, &Uniforms::default());
    frame.write_lights(&gpu.queue, &lights).unwrap();
    frame.write_fragment_uniforms(&gpu.queue, &FragmentUniforms::new(2, Vec3::Z, 4));
}

#[test]
fn writing_past_capacity_fails_without_touching_the_buffer() {
    let Some(gpu) = gpu() else { return };
    let frame = FrameResources::new(&gpu.device, 2);
    let lights = vec![Light::default(); 3];

    let err = frame.write_lights(&gpu.queue, &lights).unwrap_err();
    assert!(matches!(
        err,
        RenderError::TooManyLights {
            count: 3,
            capacity: 2
        }
    ));
}

#[test]
fn empty_rig_uploads_cleanly() {
    let Some(gpu) = gpu() else { return };
    let rig = LightRig::default();
    let frame = FrameResources::new(&gpu.device, rig.lights.len());
    assert_eq!(frame.light_capacity(), 1);

    frame.write_lights(&gpu.queue, &rig.lights()).unwrap();
    let fragment = rig.fragment_uniforms(Vec3::ZERO);
    assert_eq!(fragment.light_count, 0);
    frame.write_fragment_uniforms(&gpu.queue, &fragment);
}

#[test]
fn showcase_rig_fits_the_default_capacity() {
    let Some(gpu) = gpu() else { return };
    let rig = LightRig::showcase();
    let frame = FrameResources::new(&gpu.device, MAX_LIGHTS);
    frame.write_lights(&gpu.queue, &rig.lights()).unwrap();
}

#[test]
fn material_bind_group_matches_its_layout() {
    let Some(gpu) = gpu() else { return };
    let layout = bindings::create_material_layout(&gpu.device);

    let solid = BaseColorTexture::solid(&gpu.device, &gpu.queue, [255, 0, 255, 255]).unwrap();
    let _ = solid.bind_group(&gpu.device, &layout);

    let checker: Vec<u8> = (0..4)
        .flat_map(|i| if i % 2 == 0 { [0, 0, 0, 255] } else { [255; 4] })
        .collect();
    let tiled = BaseColorTexture::from_rgba8(&gpu.device, &gpu.queue, 2, 2, &checker).unwrap();
    let _ = tiled.bind_group(&gpu.device, &layout);
}

#[test]
fn degenerate_texture_extents_return_errors() {
    let Some(gpu) = gpu() else { return };

    let err = BaseColorTexture::from_rgba8(&gpu.device, &gpu.queue, 0, 0, &[]).unwrap_err();
    assert!(matches!(
        err,
        RenderError::TextureExtent {
            width: 0,
            height: 0,
            ..
        }
    ));

    let max = gpu.device.limits().max_texture_dimension_2d;
    let err = BaseColorTexture::from_rgba8(&gpu.device, &gpu.queue, max + 1, 1, &[]).unwrap_err();
    assert!(matches!(err, RenderError::TextureExtent { max: m, .. } if m == max));
}
