/// Convenience result type used across geoquad.
pub type QuadResult<T> = Result<T, QuadError>;

/// Top-level error taxonomy used by geoquad APIs.
#[derive(thiserror::Error, Debug)]
pub enum QuadError {
    /// Invalid user-provided scene, feature or quad data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A geographic coordinate could not be mapped to display space.
    #[error("projection error: {0}")]
    Projection(String),

    /// A lifecycle entry point was called in a state that does not allow it.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Errors raised by draw dispatch or rasterization.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuadError {
    /// Build a [`QuadError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QuadError::Projection`] value.
    pub fn projection(msg: impl Into<String>) -> Self {
        Self::Projection(msg.into())
    }

    /// Build a [`QuadError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`QuadError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`QuadError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for QuadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
