//! Secret providers for deploy profiles.
//!
//! Every backend implements [`SecretProvider`], a read-only lookup by
//! [`SecretRef`](profile_primitives::SecretRef). Backends never log secret
//! values; at most the reference name is recorded at `debug`/`trace`.

#![warn(missing_docs, clippy::pedantic)]

mod env;
mod error;
mod file;
mod layered;
mod memory;
mod provider;

pub use env::{DEFAULT_ENV_PREFIX, EnvSecretProvider};
pub use error::{SecretError, SecretResult};
pub use file::JsonFileSecretProvider;
pub use layered::LayeredSecretProvider;
pub use memory::MemorySecretProvider;
pub use provider::SecretProvider;
