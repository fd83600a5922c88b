/// Convenience result type used across Serpentine.
pub type SerpentineResult<T> = Result<T, SerpentineError>;

/// Top-level error taxonomy used by crate APIs.
#[derive(thiserror::Error, Debug)]
pub enum SerpentineError {
    /// Invalid user-provided parameters or out-of-range indices.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while turning a scene into pixels or markup.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SerpentineError {
    /// Build a [`SerpentineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SerpentineError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SerpentineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
