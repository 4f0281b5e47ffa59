//! Secret provider contract.

use std::sync::Arc;

use async_trait::async_trait;
use profile_primitives::{SecretRef, SecretValue};

use crate::error::SecretResult;

/// Read-only lookup of named secrets.
///
/// Implementations must be safe to call concurrently and should fail fast with
/// [`SecretError::Unavailable`](crate::SecretError::Unavailable) rather than
/// block when their backend is unreachable.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Returns the secret registered under `name`.
    async fn get(&self, name: &SecretRef) -> SecretResult<SecretValue>;
}

#[async_trait]
impl<P> SecretProvider for Arc<P>
where
    P: SecretProvider + ?Sized,
{
    async fn get(&self, name: &SecretRef) -> SecretResult<SecretValue> {
        self.as_ref().get(name).await
    }
}

#[async_trait]
impl<P> SecretProvider for Box<P>
where
    P: SecretProvider + ?Sized,
{
    async fn get(&self, name: &SecretRef) -> SecretResult<SecretValue> {
        self.as_ref().get(name).await
    }
}
