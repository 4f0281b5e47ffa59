//! Core shared types for multi-target deploy profiles.

#![warn(missing_docs, clippy::pedantic)]

mod build;
mod endpoint;
mod error;
mod ids;
mod profile;
mod secret;

/// Global compiler settings and per-target overrides.
pub use build::{BuildOverrides, BuildSettings, BuildSettingsBuilder};
/// Endpoint URL templates with embedded secret references.
pub use endpoint::{EndpointSegment, EndpointTemplate};
/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Validated identifiers for targets and secrets.
pub use ids::{SecretRef, TargetName};
/// Declared deployment target profile.
pub use profile::{TargetProfile, TargetProfileBuilder};
/// Raw secret material that zeroizes on drop.
pub use secret::SecretValue;
