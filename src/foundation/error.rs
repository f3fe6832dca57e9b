/// Convenience result type used across QuickEdit.
pub type QuickEditResult<T> = Result<T, QuickEditError>;

/// Top-level error taxonomy used by the pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum QuickEditError {
    /// A render parameter is outside its domain or could not be parsed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Acquisition received bytes that are not a decodable raster image.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// An internal invariant was broken (buffer size mismatch, draw rect outside the canvas).
    #[error("precondition violation: {0}")]
    PreconditionViolation(String),

    /// Encoding or delivering an exported image failed.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuickEditError {
    /// Build a [`QuickEditError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`QuickEditError::UnsupportedInput`] value.
    pub fn unsupported_input(msg: impl Into<String>) -> Self {
        Self::UnsupportedInput(msg.into())
    }

    /// Build a [`QuickEditError::PreconditionViolation`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionViolation(msg.into())
    }

    /// Build a [`QuickEditError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
