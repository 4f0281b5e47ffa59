//! Environment-variable backed secret provider.

use async_trait::async_trait;
use profile_primitives::{SecretRef, SecretValue};
use tracing::trace;

use crate::error::{SecretError, SecretResult};
use crate::provider::SecretProvider;

/// Prefix applied to variable names by [`EnvSecretProvider::new`].
pub const DEFAULT_ENV_PREFIX: &str = "DEPLOY_SECRET_";

/// Reads secrets from process environment variables.
///
/// A reference maps to `<prefix><NAME>` where `NAME` is the reference in upper
/// snake case: `signingKey` becomes `DEPLOY_SECRET_SIGNING_KEY` and
/// `deploy/api-key` becomes `DEPLOY_SECRET_DEPLOY_API_KEY`. The environment is
/// read on every lookup.
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    prefix: String,
}

impl EnvSecretProvider {
    /// Creates a provider using [`DEFAULT_ENV_PREFIX`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Creates a provider with a custom variable prefix (may be empty).
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the variable prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the environment variable consulted for `name`.
    ///
    /// The mapping is not injective: `signingKey`, `signing_key`,
    /// `signing-key` and `signing/key` all read `<prefix>SIGNING_KEY`. A
    /// registry that needs them as distinct secrets must use a different
    /// backend or distinct spellings.
    #[must_use]
    pub fn variable_name(&self, name: &SecretRef) -> String {
        let mut variable = self.prefix.clone();
        let mut previous: Option<char> = None;
        for c in name.as_str().chars() {
            if c.is_ascii_uppercase()
                && previous.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
            {
                variable.push('_');
            }
            if c.is_ascii_alphanumeric() {
                variable.push(c.to_ascii_uppercase());
            } else {
                variable.push('_');
            }
            previous = Some(c);
        }
        variable
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn get(&self, name: &SecretRef) -> SecretResult<SecretValue> {
        let variable = self.variable_name(name);
        trace!(secret = %name, %variable, "reading secret from environment");
        match std::env::var_os(&variable) {
            None => Err(SecretError::not_found(name)),
            Some(value) => value.into_string().map(SecretValue::from).map_err(|_| {
                SecretError::unavailable(format!("environment variable `{variable}` is not valid UTF-8"))
            }),
        }
    }
}
