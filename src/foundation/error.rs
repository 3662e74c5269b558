/// Convenience result type used across the crate.
pub type FilmResult<T> = Result<T, FilmError>;

/// Top-level error type for manifest handling, frame loading and player setup.
#[derive(thiserror::Error, Debug)]
pub enum FilmError {
    /// Invalid options or inputs.
    #[error("validation error: {0}")]
    Validation(String),

    /// Manifest could not be fetched, parsed or generated.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// A single frame could not be fetched or probed.
    #[error("frame load error: {0}")]
    Load(String),

    /// JSON encode/decode failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, usually I/O or image decoding with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FilmError {
    /// Build a [`FilmError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FilmError::Manifest`].
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    /// Build a [`FilmError::Load`].
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`FilmError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
