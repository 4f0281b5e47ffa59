//! Multi-target deployment profile registry facade.
//!
//! Bundles the workspace crates behind feature flags: declare targets in a
//! [`registry`], supply secrets through a [`secrets`] backend, and hand
//! fully populated profiles to a build pipeline through the [`resolver`].

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use profile_primitives as primitives;

/// Profile registry and static definition loaders (enabled by `registry` feature).
#[cfg(feature = "registry")]
pub use profile_registry as registry;

/// Secret provider contract and backends (enabled by `secrets` feature).
#[cfg(feature = "secrets")]
pub use profile_secrets as secrets;

/// On-demand profile resolution (enabled by `resolver` feature).
#[cfg(feature = "resolver")]
pub use profile_resolver as resolver;

/// Tracing setup for binaries (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use profile_telemetry as telemetry;
