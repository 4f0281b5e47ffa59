//! Error types for profile resolution.

use profile_primitives::TargetName;
use profile_registry::RegistryError;
use profile_secrets::SecretError;
use thiserror::Error;

/// Errors surfaced while resolving a target.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Registry lookup failed (unknown target, missing build settings).
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Secret provider failed; propagated unchanged.
    #[error(transparent)]
    Secret(#[from] SecretError),
    /// The endpoint could not be rendered into a valid URL.
    #[error("target `{name}` has an invalid endpoint: {reason}")]
    InvalidEndpoint {
        /// Target whose endpoint failed.
        name: TargetName,
        /// Human-readable reason; never includes substituted secret values.
        reason: String,
    },
    /// A default target was requested from an empty registry.
    #[error("registry has no targets")]
    NoTargets,
}

/// Result alias for resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;
