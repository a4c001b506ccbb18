//! Host structs against the shader-side contract.

use glam::{Mat4, Vec3};
use lumen_core::{
    Attributes, BufferIndices, FragmentUniforms, LayoutError, LayoutRules, Light, LightType,
    ShaderEnum, SpotCone, Textures, Uniforms,
    layout::{self, Member, padded_layout},
    verify_all,
};

#[test]
fn every_struct_matches_metal_rules() {
    let layouts = verify_all(LayoutRules::Metal).unwrap();
    let sizes: Vec<(&str, usize)> = layouts.iter().map(|l| (l.name, l.size)).collect();
    assert_eq!(
        sizes,
        [("Uniforms", 240), ("Light", 128), ("FragmentUniforms", 48)]
    );
}

#[test]
fn unpadded_wgsl_would_misplace_light_intensity() {
    assert_eq!(
        layout::verify::<Light>(LayoutRules::Wgsl),
        Err(LayoutError::OffsetMismatch {
            structure: "Light",
            field: "intensity",
            host: 48,
            shader: 44,
        })
    );
}

#[test]
fn padded_wgsl_reproduces_every_host_offset() {
    fn check<T: lumen_core::GpuStruct>() {
        let members = padded_layout::<T>(LayoutRules::Wgsl).unwrap();
        let fields: Vec<_> = members
            .iter()
            .filter_map(|m| match m {
                Member::Field(f) => Some(f),
                Member::Pad { .. } => None,
            })
            .collect();
        assert_eq!(fields.len(), T::FIELDS.len());
        for (placed, desc) in fields.iter().zip(T::FIELDS) {
            assert_eq!(placed.offset, desc.host_offset, "{}", desc.shader_name);
        }
    }

    check::<Uniforms>();
    check::<Light>();
    check::<FragmentUniforms>();
}

#[test]
fn light_array_stride_is_struct_size() {
    let lights = [
        Light::sunlight(Vec3::new(1.0, 2.0, -2.0)),
        Light::pointlight(Vec3::new(0.0, 0.5, -0.5), Vec3::new(1.0, 0.0, 0.0)),
    ];
    let bytes: &[u8] = bytemuck::cast_slice(&lights);
    assert_eq!(bytes.len(), 256);
    // type tag of the second light sits at 128 + 80
    let tag = u32::from_ne_bytes(bytes[208..212].try_into().unwrap());
    assert_eq!(tag, LightType::Pointlight.index());
}

#[test]
fn enumerant_table() {
    let table: Vec<(&str, u32)> = LightType::variants()
        .iter()
        .map(|v| (v.shader_name(), v.index()))
        .collect();
    assert_eq!(
        table,
        [
            ("unused", 0),
            ("Sunlight", 1),
            ("Spotlight", 2),
            ("Pointlight", 3),
            ("Ambientlight", 4)
        ]
    );
    assert_eq!(Attributes::UV as u32, 2);
    assert_eq!(Textures::BaseColorTexture as u32, 0);
    assert_eq!(BufferIndices::Lights as u32, 2);
}

#[test]
fn shading_consumer_scenarios() {
    let spot = Light::spotlight(
        Vec3::new(0.4, 0.8, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        SpotCone {
            angle: 40f32.to_radians(),
            direction: Vec3::new(-2.0, 0.0, -1.5),
            attenuation: 12.0,
        },
    );
    let point = Light::pointlight(Vec3::ZERO, Vec3::ONE);
    let lights = [spot, point];

    let cone = lights[0].spot_cone().unwrap();
    assert_eq!(cone.attenuation, 12.0);
    assert!(lights[1].spot_cone().is_none());

    let dark = FragmentUniforms::new(0, Vec3::ZERO, 1);
    assert!(dark.active_lights(&lights).is_empty());

    let lit = FragmentUniforms::new(2, Vec3::ZERO, 1);
    assert_eq!(lit.active_lights(&lights), &lights);
}

#[test]
fn uniforms_bytes_start_with_model_matrix() {
    let model = Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0));
    let uniforms = Uniforms::new(model, Mat4::IDENTITY, Mat4::IDENTITY);
    let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&uniforms));
    assert_eq!(floats.len(), 60);
    assert_eq!(&floats[12..15], &[5.0, 6.0, 7.0]);
}
