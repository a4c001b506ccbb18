use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rig JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tiling must be at least 1")]
    InvalidTiling,

    #[error("{count} lights exceed the limit of {max}")]
    TooManyLights { count: usize, max: usize },

    #[error("light {index}: {reason}")]
    InvalidLight { index: usize, reason: String },
}

impl AssetError {
    pub fn invalid_light(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidLight {
            index,
            reason: reason.into(),
        }
    }
}
