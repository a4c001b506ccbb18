//! Scene lighting described in JSON and turned into the payloads of
//! `lumen_core`.

mod error;
pub mod rig;

pub use error::AssetError;
pub use rig::{CameraConfig, LightDesc, LightRig, Shading};
