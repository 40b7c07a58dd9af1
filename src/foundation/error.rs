/// Convenience result type used across panoview.
pub type PanoResult<T> = Result<T, PanoError>;

/// Top-level error taxonomy used by viewer APIs.
///
/// Per-frame paths never return errors; these cover setup, configuration and the
/// presentation requests that a user can retry.
#[derive(thiserror::Error, Debug)]
pub enum PanoError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A presentation device rejected a request.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// The host lacks a capability the caller asked for.
    #[error("capability error: {0}")]
    Capability(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PanoError {
    /// Build a [`PanoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PanoError::Capability`] value.
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }

    /// Build a [`PanoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Failure outcome of an asynchronous presentation-device operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device refused to start or stop presenting.
    #[error("{op} rejected: {reason}")]
    Rejected {
        /// Operation name (`requestPresent` / `exitPresent`).
        op: &'static str,
        /// Reason reported by the device.
        reason: String,
    },

    /// The device cannot present at all.
    #[error("device cannot present")]
    NotPresentable,
}

impl DeviceError {
    /// Build a [`DeviceError::Rejected`] value.
    pub fn rejected(op: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            op,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
