//! JSON file backed secret provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use profile_primitives::{SecretRef, SecretValue};
use serde_json::{Map, Value};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{SecretError, SecretResult};
use crate::provider::SecretProvider;

/// Reads secrets from a JSON object file such as `{"pk": "0x..", "apiKey": ".."}`.
///
/// The file is read again on every lookup so that rotated values take effect
/// without restarting the process.
#[derive(Debug, Clone)]
pub struct JsonFileSecretProvider {
    path: PathBuf,
}

impl JsonFileSecretProvider {
    /// Creates a provider for the file at `path`. The file is not opened yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> SecretResult<Map<String, Value>> {
        let bytes = Zeroizing::new(tokio::fs::read(&self.path).await.map_err(|err| {
            SecretError::unavailable(format!("cannot read {}: {err}", self.path.display()))
        })?);

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) => Err(SecretError::unavailable(format!(
                "{} must contain a JSON object",
                self.path.display()
            ))),
            // serde_json errors only report positions, never the offending text.
            Err(err) => Err(SecretError::unavailable(format!(
                "cannot parse {}: {err}",
                self.path.display()
            ))),
        }
    }
}

#[async_trait]
impl SecretProvider for JsonFileSecretProvider {
    async fn get(&self, name: &SecretRef) -> SecretResult<SecretValue> {
        debug!(secret = %name, path = %self.path.display(), "reading secret file");
        let mut document = self.read_document().await?;
        match document.remove(name.as_str()) {
            None => Err(SecretError::not_found(name)),
            Some(Value::String(value)) => Ok(SecretValue::from(value)),
            Some(_) => Err(SecretError::unavailable(format!(
                "secret `{name}` in {} is not a string",
                self.path.display()
            ))),
        }
    }
}
