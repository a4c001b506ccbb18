#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible GPU adapter: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("{count} lights do not fit a buffer sized for {capacity}")]
    TooManyLights { count: usize, capacity: usize },

    #[error("texture extent {width}x{height} is outside 1..={max}")]
    TextureExtent { width: u32, height: u32, max: u32 },

    #[error("texture data is {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    TextureSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}
