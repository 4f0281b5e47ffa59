//! Error types for secret lookups.

use profile_primitives::SecretRef;
use thiserror::Error;

/// Errors emitted by secret providers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// No secret is registered under the requested name.
    #[error("secret `{name}` not found")]
    NotFound {
        /// Requested reference.
        name: SecretRef,
    },
    /// The backing store could not be reached or read.
    #[error("secret source unavailable: {reason}")]
    Unavailable {
        /// Human-readable reason; never contains secret material.
        reason: String,
    },
}

impl SecretError {
    /// Helper to construct not-found errors.
    #[must_use]
    pub fn not_found(name: &SecretRef) -> Self {
        Self::NotFound { name: name.clone() }
    }

    /// Helper to construct unavailable errors from string-like values.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`SecretError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for secret operations.
pub type SecretResult<T> = Result<T, SecretError>;
