//! Registry of deployment target profiles.
//!
//! The registry is populated once at startup, either in code through
//! [`ProfileRegistry::register`] or from a static JSON/TOML definition via the
//! [`loader`] module, and treated as read-only afterwards.

#![warn(missing_docs, clippy::pedantic)]

mod error;
pub mod loader;
mod registry;

pub use error::{RegistryError, RegistryResult};
pub use loader::RegistryDefinition;
pub use registry::ProfileRegistry;
