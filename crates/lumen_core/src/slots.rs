//! Binding slot numbers shared by host code (attaching buffers and textures)
//! and shader code (declaring the matching bindings).

use crate::enums::shader_enum;

shader_enum! {
    /// Vertex attribute locations.
    pub enum Attributes as "Attributes" {
        Position = 0 => "Position",
        Normal = 1 => "Normal",
        UV = 2 => "UV",
    }
}

shader_enum! {
    /// Texture binding slots.
    pub enum Textures as "Textures" {
        BaseColorTexture = 0 => "BaseColorTexture",
    }
}

shader_enum! {
    /// Buffer binding slots. `Vertices` is the vertex stream, the rest are
    /// the payloads in `uniforms` and `light`.
    pub enum BufferIndices as "BufferIndices" {
        Vertices = 0 => "BufferIndexVertices",
        Uniforms = 1 => "BufferIndexUniforms",
        Lights = 2 => "BufferIndexLights",
        FragmentUniforms = 3 => "BufferIndexFragmentUniforms",
    }
}
