//! Error types for registry construction and lookup.

use std::path::PathBuf;

use profile_primitives::TargetName;
use thiserror::Error;

/// Errors surfaced by the profile registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A profile with this name is already registered.
    #[error("target `{name}` is already registered")]
    DuplicateTargetName {
        /// Conflicting target name.
        name: TargetName,
    },
    /// The profile endpoint is malformed or carries an unresolved placeholder.
    #[error("target `{name}` has an invalid endpoint: {reason}")]
    InvalidEndpoint {
        /// Target whose endpoint was rejected.
        name: TargetName,
        /// Human-readable reason.
        reason: String,
    },
    /// No profile is registered under this name.
    #[error("unknown target `{name}`")]
    UnknownTarget {
        /// Requested target name.
        name: String,
    },
    /// Global build settings were never configured.
    #[error("build settings have not been configured")]
    BuildSettingsNotConfigured,
    /// A primitive value in the definition failed validation.
    #[error(transparent)]
    Profile(#[from] profile_primitives::Error),
    /// The definition file could not be read.
    #[error("cannot read registry definition {path}: {source}")]
    Io {
        /// Definition file path.
        path: PathBuf,
        /// Source [`std::io::Error`].
        #[source]
        source: std::io::Error,
    },
    /// The definition could not be parsed.
    #[error("cannot parse registry definition: {reason}")]
    Parse {
        /// Parser error message.
        reason: String,
    },
    /// The definition file extension is not recognised.
    #[error("unsupported registry definition format: {path}")]
    UnsupportedFormat {
        /// Definition file path.
        path: PathBuf,
    },
}

impl RegistryError {
    /// Convenience helper to construct unknown-target errors.
    #[must_use]
    pub fn unknown_target(name: impl Into<String>) -> Self {
        Self::UnknownTarget { name: name.into() }
    }
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
