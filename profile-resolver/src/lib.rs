//! Resolution of deploy profiles against live secrets.
//!
//! A [`Resolver`] combines an immutable [`ProfileRegistry`](profile_registry::ProfileRegistry)
//! with a [`SecretProvider`](profile_secrets::SecretProvider) and produces a
//! fresh [`ResolvedProfile`] on every call. Nothing is cached, so rotated
//! credentials are picked up by the next resolution.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod resolved;
mod resolver;

pub use error::{ResolveError, ResolveResult};
pub use resolved::ResolvedProfile;
pub use resolver::Resolver;
