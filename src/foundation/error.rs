/// Crate-wide result alias.
pub type FramestepResult<T> = Result<T, FramestepError>;

/// Error taxonomy for the engine.
///
/// Domain clamps and idempotent restarts are not errors; everything here is a usage error
/// surfaced synchronously at the call that caused it.
#[derive(thiserror::Error, Debug)]
pub enum FramestepError {
    /// Invalid input (unknown handle, non-finite coordinate, bad retarget index, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Script (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Opaque passthrough for host-side failures (IO, rendering backends).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramestepError {
    /// Build a [`FramestepError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FramestepError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FramestepError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
