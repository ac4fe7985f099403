/// Convenience result type used across sensorreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by runtime APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid configuration or scene-construction data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A collaborator was used before it was wired up (scene-construction bug).
    #[error("uninitialized dependency: {0}")]
    Uninitialized(String),

    /// Errors while painting a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing frames or assembling the video.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Uninitialized`] value.
    pub fn uninitialized(msg: impl Into<String>) -> Self {
        Self::Uninitialized(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
