//! Merges secrets into registered profiles.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use profile_primitives::{BuildSettings, EndpointTemplate, SecretValue, TargetName};
use profile_registry::ProfileRegistry;
use profile_secrets::SecretProvider;
use tracing::{debug, warn};

use crate::error::{ResolveError, ResolveResult};
use crate::resolved::ResolvedProfile;

/// Produces [`ResolvedProfile`]s from a frozen registry and a secret provider.
///
/// Cloning is cheap and clones share the same registry and provider, so a
/// resolver can be handed to concurrent tasks directly.
#[derive(Clone)]
pub struct Resolver {
    registry: Arc<ProfileRegistry>,
    secrets: Arc<dyn SecretProvider>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("targets", &self.registry.len())
            .field("secrets", &"dyn SecretProvider")
            .finish()
    }
}

impl Resolver {
    /// Creates a resolver over an immutable registry.
    #[must_use]
    pub fn new(registry: Arc<ProfileRegistry>, secrets: Arc<dyn SecretProvider>) -> Self {
        Self { registry, secrets }
    }

    /// Returns the underlying registry.
    #[must_use]
    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Returns the global build settings.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Registry`] wrapping
    /// `BuildSettingsNotConfigured` if the registry has none.
    pub fn build_settings(&self) -> ResolveResult<&BuildSettings> {
        Ok(self.registry.build_settings()?)
    }

    /// Resolves the named target, reading every secret afresh.
    ///
    /// # Errors
    ///
    /// Propagates `UnknownTarget` and `BuildSettingsNotConfigured` from the
    /// registry before any secret is read, secret provider errors unchanged,
    /// and [`ResolveError::InvalidEndpoint`] if the rendered endpoint is not a
    /// valid URL.
    pub async fn resolve(&self, name: &str) -> ResolveResult<ResolvedProfile> {
        match self.resolve_target(name).await {
            Ok(resolved) => {
                debug!(target_name = name, endpoint = %resolved.display_endpoint(), "resolved deploy target");
                Ok(resolved)
            }
            Err(err) => {
                warn!(target_name = name, error = %err, "failed to resolve deploy target");
                Err(err)
            }
        }
    }

    /// Resolves the registry's default target.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoTargets`] for an empty registry, otherwise as
    /// [`Resolver::resolve`].
    pub async fn resolve_default(&self) -> ResolveResult<ResolvedProfile> {
        let name = self
            .registry
            .default_target()
            .ok_or(ResolveError::NoTargets)?;
        self.resolve(name.as_str()).await
    }

    /// Resolves several targets concurrently.
    ///
    /// Results keep the order of `names`; a failure for one target does not
    /// affect the others.
    pub async fn resolve_many<I, S>(&self, names: I) -> Vec<(String, ResolveResult<ResolvedProfile>)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pending = names.into_iter().map(|name| {
            let name = name.as_ref().to_owned();
            async move {
                let result = self.resolve(&name).await;
                (name, result)
            }
        });
        join_all(pending).await
    }

    /// Resolves every registered target concurrently, in registration order.
    pub async fn resolve_all(&self) -> Vec<(String, ResolveResult<ResolvedProfile>)> {
        let names: Vec<String> = self.registry.names().map(ToString::to_string).collect();
        self.resolve_many(names).await
    }

    async fn resolve_target(&self, name: &str) -> ResolveResult<ResolvedProfile> {
        let profile = self.registry.get(name)?;
        let global = self.registry.build_settings()?;
        let build = profile
            .build_overrides()
            .map_or_else(|| global.clone(), |overrides| overrides.apply(global));

        let template = EndpointTemplate::parse(profile.endpoint())
            .map_err(|err| invalid_endpoint(profile.name(), err))?;

        let credential = self.secrets.get(profile.credential()).await?;

        let explorer_ref = profile
            .explorer_key()
            .or_else(|| self.registry.default_explorer_key());
        let explorer_key = match explorer_ref {
            Some(reference) => Some(self.secrets.get(reference).await?),
            None => None,
        };

        let mut endpoint_secrets: BTreeMap<_, SecretValue> = BTreeMap::new();
        for reference in template.secret_refs() {
            if !endpoint_secrets.contains_key(reference) {
                let value = self.secrets.get(reference).await?;
                endpoint_secrets.insert(reference.clone(), value);
            }
        }
        let endpoint = template
            .render(&endpoint_secrets)
            .map_err(|err| invalid_endpoint(profile.name(), err))?;

        Ok(ResolvedProfile {
            name: profile.name().clone(),
            endpoint,
            endpoint_template: template.as_str().to_owned(),
            endpoint_has_secrets: template.has_secrets(),
            credential,
            explorer_key,
            chain_id: profile.chain_id(),
            build,
        })
    }
}

fn invalid_endpoint(name: &TargetName, err: profile_primitives::Error) -> ResolveError {
    let reason = match err {
        profile_primitives::Error::InvalidEndpoint { reason, .. } => reason,
        other => other.to_string(),
    };
    ResolveError::InvalidEndpoint {
        name: name.clone(),
        reason,
    }
}
