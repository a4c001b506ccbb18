//! wgpu side of the shared layout: bind group layouts keyed by the slot
//! enums, the buffers that receive the payloads, and the vertex and texture
//! bindings.

pub mod bindings;
pub mod context;
mod error;
pub mod frame_resources;
pub mod texture;
pub mod vertex;

pub use context::GpuContext;
pub use error::RenderError;
pub use frame_resources::FrameResources;
pub use texture::BaseColorTexture;
pub use vertex::{VertexLayout, vertex_buffer_layout};
