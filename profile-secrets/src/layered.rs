//! Ordered fallback across several providers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use profile_primitives::{SecretRef, SecretValue};
use tracing::trace;

use crate::error::{SecretError, SecretResult};
use crate::provider::SecretProvider;

/// Consults providers in order until one knows the requested secret.
///
/// [`SecretError::NotFound`] falls through to the next layer. Any other
/// outcome, including [`SecretError::Unavailable`], ends the lookup.
#[derive(Default, Clone)]
pub struct LayeredSecretProvider {
    layers: Vec<Arc<dyn SecretProvider>>,
}

impl fmt::Debug for LayeredSecretProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredSecretProvider")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl LayeredSecretProvider {
    /// Creates a provider with no layers; every lookup is not-found.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a lower-priority layer.
    #[must_use]
    pub fn with_layer(mut self, layer: Arc<dyn SecretProvider>) -> Self {
        self.layers.push(layer);
        self
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` when no layer is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[async_trait]
impl SecretProvider for LayeredSecretProvider {
    async fn get(&self, name: &SecretRef) -> SecretResult<SecretValue> {
        for (index, layer) in self.layers.iter().enumerate() {
            match layer.get(name).await {
                Err(SecretError::NotFound { .. }) => {
                    trace!(secret = %name, layer = index, "secret not in layer");
                }
                other => return other,
            }
        }
        Err(SecretError::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySecretProvider;

    struct Unreachable;

    #[async_trait]
    impl SecretProvider for Unreachable {
        async fn get(&self, _name: &SecretRef) -> SecretResult<SecretValue> {
            Err(SecretError::unavailable("vault sealed"))
        }
    }

    fn reference(value: &str) -> SecretRef {
        SecretRef::new(value).expect("reference")
    }

    #[tokio::test]
    async fn earlier_layers_win() {
        let overlay = Arc::new(MemorySecretProvider::with_secrets([(reference("pk"), "overlay")]));
        let base = Arc::new(MemorySecretProvider::with_secrets([
            (reference("pk"), "base"),
            (reference("apiKey"), "base-api"),
        ]));
        let provider = LayeredSecretProvider::new().with_layer(overlay).with_layer(base);

        assert_eq!(provider.get(&reference("pk")).await.unwrap().expose(), "overlay");
        assert_eq!(provider.get(&reference("apiKey")).await.unwrap().expose(), "base-api");
        assert!(provider.get(&reference("missing")).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn unavailable_layer_stops_lookup() {
        let base = Arc::new(MemorySecretProvider::with_secrets([(reference("pk"), "base")]));
        let provider = LayeredSecretProvider::new()
            .with_layer(Arc::new(Unreachable))
            .with_layer(base);

        let err = provider.get(&reference("pk")).await.expect_err("unavailable");
        assert!(matches!(err, SecretError::Unavailable { .. }));
    }
}
