use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use lumen_assets::LightRig;
use lumen_core::{
    FragmentUniforms, Light, LayoutRules, MAX_LIGHTS, Uniforms,
    codegen::{msl, wgsl},
    layout::{self, Member},
    transform::Transform,
    vertex::{VertexDescriptor, VertexPacking},
};
use lumen_renderer::{
    BaseColorTexture, FrameResources, GpuContext, bindings, vertex_buffer_layout,
};

#[derive(Parser, Debug)]
#[command(name = "lumen", version, about = "Shared GPU layout tools")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Rules {
    Metal,
    Wgsl,
}

impl From<Rules> for LayoutRules {
    fn from(rules: Rules) -> Self {
        match rules {
            Rules::Metal => LayoutRules::Metal,
            Rules::Wgsl => LayoutRules::Wgsl,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Language {
    Wgsl,
    Msl,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print field offsets and sizes of the shared structs
    Layout {
        #[arg(long, value_enum, default_value_t = Rules::Metal)]
        rules: Rules,
    },
    /// Emit shader declarations for the shared structs and enums
    Emit {
        #[arg(value_enum)]
        language: Language,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Validate a light rig and print the payloads it produces
    Rig { path: PathBuf },
    /// Open a headless device and upload a rig into the frame buffers
    Probe {
        #[arg(long)]
        rig: Option<PathBuf>,
    },
}

fn print_padded<T: layout::GpuStruct>(rules: LayoutRules) -> Result<()> {
    println!("{} ({} rules, host-padded):", T::SHADER_NAME, rules.name());
    for member in layout::padded_layout::<T>(rules)? {
        match member {
            Member::Field(field) => println!(
                "  {:>4} {:>3}  {:<18} {:?}",
                field.offset, field.size, field.shader_name, field.ty
            ),
            Member::Pad { index, offset } => println!("  {:>4}   4  _pad{}", offset, index),
        }
    }
    println!("  size {}", std::mem::size_of::<T>());
    Ok(())
}

fn layout_cmd(rules: LayoutRules) -> Result<()> {
    match rules {
        LayoutRules::Metal => {
            for structure in lumen_core::verify_all(rules)? {
                print!("{structure}");
            }
        }
        // WGSL packs vec3 + scalar, so the host layout needs explicit pads.
        LayoutRules::Wgsl => {
            print_padded::<Uniforms>(rules)?;
            print_padded::<Light>(rules)?;
            print_padded::<FragmentUniforms>(rules)?;
        }
    }
    Ok(())
}

fn emit_cmd(language: Language, out: Option<PathBuf>) -> Result<()> {
    let source = match language {
        Language::Wgsl => wgsl::prelude()?,
        Language::Msl => msl::common_header()?,
    };
    match out {
        Some(path) => {
            fs::write(&path, source).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => print!("{source}"),
    }
    Ok(())
}

fn load_rig(path: Option<PathBuf>) -> Result<LightRig> {
    match path {
        Some(path) => LightRig::load(&path).with_context(|| format!("loading {}", path.display())),
        None => Ok(LightRig::showcase()),
    }
}

fn rig_cmd(path: PathBuf) -> Result<()> {
    let rig = load_rig(Some(path))?;
    let camera = rig.camera.to_camera();
    let fragment = rig.fragment_uniforms(camera.position());
    let lights = rig.lights();

    println!(
        "lightCount {}, tiling {}, cameraPosition {:?}",
        fragment.light_count, fragment.tiling, fragment.camera_position
    );
    for (index, light) in fragment.active_lights(&lights).iter().enumerate() {
        let ty = light.light_type()?;
        println!(
            "  [{index}] {ty:?} at {:?} color {:?} intensity {}",
            light.position, light.color, light.intensity
        );
        if let Some(cone) = light.spot_cone() {
            println!(
                "       cone {:.1} deg toward {:?}, attenuation {}",
                cone.angle.to_degrees(),
                cone.direction,
                cone.attenuation
            );
        }
    }
    Ok(())
}

fn probe_cmd(path: Option<PathBuf>) -> Result<()> {
    lumen_core::verify_all(LayoutRules::Metal)?;
    let rig = load_rig(path)?;
    let gpu = GpuContext::headless()?;

    let frame = FrameResources::new(&gpu.device, MAX_LIGHTS);
    let material_layout = bindings::create_material_layout(&gpu.device);
    let texture = BaseColorTexture::solid(&gpu.device, &gpu.queue, [200, 200, 200, 255])?;
    let _material = texture.bind_group(&gpu.device, &material_layout);
    let vertex_layout = vertex_buffer_layout(&VertexDescriptor::standard(VertexPacking::Tight));

    let mut camera = rig.camera.to_camera();
    camera.set_aspect(800, 600);
    let uniforms = Transform::default().uniforms(&camera);
    let lights = rig.lights();

    frame.write_uniforms(&gpu.queue, &uniforms);
    frame.write_lights(&gpu.queue, &lights)?;
    frame.write_fragment_uniforms(&gpu.queue, &rig.fragment_uniforms(camera.position()));

    info!(
        "uploaded {} lights into a buffer for {}, vertex stride {}",
        lights.len(),
        frame.light_capacity(),
        vertex_layout.array_stride
    );
    println!(
        "probe ok: {} lights, camera at {:?}",
        lights.len(),
        camera.position()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout { rules } => layout_cmd(rules.into()),
        Command::Emit { language, out } => emit_cmd(language, out),
        Command::Rig { path } => rig_cmd(path),
        Command::Probe { rig } => probe_cmd(rig),
    }
}
