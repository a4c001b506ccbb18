/// Result alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Everything that can go wrong when host data and shader declarations
/// disagree about the contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A raw integer does not name any enumerant of `ty`.
    #[error("{value} is not a valid {ty}")]
    UnknownDiscriminant { ty: &'static str, value: u32 },

    /// A field lands at a different byte offset on the host than in the shader.
    #[error("{structure}.{field}: host offset {host}, shader offset {shader}")]
    OffsetMismatch {
        structure: &'static str,
        field: &'static str,
        host: usize,
        shader: usize,
    },

    /// The struct as a whole has a different size on the host than in the shader.
    #[error("{structure}: host size {host}, shader size {shader}")]
    SizeMismatch {
        structure: &'static str,
        host: usize,
        shader: usize,
    },
}
