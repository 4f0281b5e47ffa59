//! In-memory secret provider.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use profile_primitives::{SecretRef, SecretValue};

use crate::error::{SecretError, SecretResult};
use crate::provider::SecretProvider;

/// Secret provider backed by a process-local map.
///
/// Values can be inserted or removed at any time, which makes this backend
/// suitable for tests and for embedding callers that fetch secrets elsewhere.
#[derive(Default)]
pub struct MemorySecretProvider {
    inner: RwLock<HashMap<SecretRef, SecretValue>>,
}

impl std::fmt::Debug for MemorySecretProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .inner
            .read()
            .map(|inner| inner.keys().map(ToString::to_string).collect())
            .unwrap_or_default();
        f.debug_struct("MemorySecretProvider")
            .field("registered", &names)
            .finish()
    }
}

impl MemorySecretProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider seeded with the supplied secrets.
    #[must_use]
    pub fn with_secrets<I, V>(secrets: I) -> Self
    where
        I: IntoIterator<Item = (SecretRef, V)>,
        V: Into<SecretValue>,
    {
        let inner = secrets
            .into_iter()
            .map(|(name, value)| (name, value.into()))
            .collect();
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Stores or replaces a secret, returning `true` if it replaced a value.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Unavailable`] if the internal lock is poisoned.
    pub fn insert(&self, name: SecretRef, value: impl Into<SecretValue>) -> SecretResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SecretError::unavailable("memory secret store poisoned"))?;
        Ok(inner.insert(name, value.into()).is_some())
    }

    /// Removes a secret, returning `true` if it was present.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::Unavailable`] if the internal lock is poisoned.
    pub fn remove(&self, name: &SecretRef) -> SecretResult<bool> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| SecretError::unavailable("memory secret store poisoned"))?;
        Ok(inner.remove(name).is_some())
    }
}

#[async_trait]
impl SecretProvider for MemorySecretProvider {
    async fn get(&self, name: &SecretRef) -> SecretResult<SecretValue> {
        let inner = self
            .inner
            .read()
            .map_err(|_| SecretError::unavailable("memory secret store poisoned"))?;
        inner
            .get(name)
            .cloned()
            .ok_or_else(|| SecretError::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(value: &str) -> SecretRef {
        SecretRef::new(value).expect("reference")
    }

    #[tokio::test]
    async fn insert_get_and_rotate() {
        let provider = MemorySecretProvider::with_secrets([(reference("signingKey"), "KEY_A")]);
        assert_eq!(provider.get(&reference("signingKey")).await.unwrap().expose(), "KEY_A");

        assert!(provider.insert(reference("signingKey"), "KEY_B").unwrap());
        assert_eq!(provider.get(&reference("signingKey")).await.unwrap().expose(), "KEY_B");
    }

    #[tokio::test]
    async fn missing_secret_is_not_found() {
        let provider = MemorySecretProvider::new();
        let err = provider.get(&reference("apiKey")).await.expect_err("missing");
        assert!(matches!(err, SecretError::NotFound { name } if name.as_str() == "apiKey"));
    }

    #[tokio::test]
    async fn poisoned_store_is_unavailable() {
        let provider = std::sync::Arc::new(MemorySecretProvider::with_secrets([(
            reference("pk"),
            "0xabc",
        )]));
        let poisoner = std::sync::Arc::clone(&provider);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the store");
        })
        .join();
        assert!(joined.is_err());

        let err = provider.get(&reference("pk")).await.expect_err("poisoned");
        assert!(matches!(err, SecretError::Unavailable { .. }));
        assert!(matches!(
            provider.insert(reference("pk"), "0xdef"),
            Err(SecretError::Unavailable { .. })
        ));
        assert!(matches!(
            provider.remove(&reference("pk")),
            Err(SecretError::Unavailable { .. })
        ));
    }

    #[test]
    fn debug_lists_names_only() {
        let provider = MemorySecretProvider::with_secrets([(reference("pk"), "super-secret")]);
        let rendered = format!("{provider:?}");
        assert!(rendered.contains("pk"));
        assert!(!rendered.contains("super-secret"));
    }
}
