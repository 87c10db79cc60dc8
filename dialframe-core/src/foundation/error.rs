use std::path::{Path, PathBuf};

/// Convenience result type used across dialframe.
pub type DialframeResult<T> = Result<T, DialframeError>;

/// Top-level error taxonomy.
///
/// Every variant is fatal for a generator run: nothing in the crate retries.
#[derive(thiserror::Error, Debug)]
pub enum DialframeError {
    /// Invalid mask, pattern or theme data. Indicates a defect in the caller's constants.
    #[error("configuration error: {0}")]
    Config(String),

    /// Overlay bitmap missing, unreadable, or not a recognized image container.
    #[error("decode error: {0}")]
    Decode(String),

    /// The image encoder rejected a frame.
    #[error("encode error: {0}")]
    Encode(String),

    /// Filesystem failure while creating, writing, removing or linking an output.
    #[error("io error at '{}': {source}", .path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DialframeError {
    /// Build a [`DialframeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`DialframeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`DialframeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`DialframeError::Io`] value for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
