//! Shared error definitions for profile primitives.

use thiserror::Error;

/// Result alias used throughout the profile primitives.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing profile primitive types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Target name failed validation.
    #[error("invalid target name `{name}`: {reason}")]
    InvalidTargetName {
        /// The offending name.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Secret reference failed validation.
    #[error("invalid secret reference `{name}`: {reason}")]
    InvalidSecretRef {
        /// The offending reference.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Endpoint is not a well-formed absolute URL or carries an unresolved placeholder.
    #[error("invalid endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint {
        /// The raw endpoint text.
        endpoint: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Build settings definition failed validation.
    #[error("invalid build settings: {reason}")]
    InvalidBuildSettings {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Target profile definition failed validation.
    #[error("invalid target profile: {reason}")]
    InvalidProfile {
        /// Human-readable reason for rejection.
        reason: String,
    },
}

impl Error {
    pub(crate) fn endpoint(endpoint: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: reason.into(),
        }
    }
}
