//! Ordered registry of target profiles and global build settings.

use indexmap::IndexMap;
use profile_primitives::{BuildSettings, EndpointTemplate, SecretRef, TargetName, TargetProfile};
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};

/// Canonical set of deployment targets.
///
/// Iteration follows registration order. Once handed to a resolver the
/// registry is shared behind an `Arc` and no longer mutated.
#[derive(Debug, Default, Clone)]
pub struct ProfileRegistry {
    targets: IndexMap<TargetName, TargetProfile>,
    build: Option<BuildSettings>,
    default_explorer_key: Option<SecretRef>,
    default_target: Option<TargetName>,
}

impl ProfileRegistry {
    /// Creates an empty registry without build settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a target profile.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateTargetName`] if the name is taken (the
    /// existing profile is kept), [`RegistryError::InvalidEndpoint`] if the
    /// endpoint is malformed, or [`RegistryError::Profile`] if build overrides
    /// are invalid.
    pub fn register(&mut self, profile: TargetProfile) -> RegistryResult<()> {
        if self.targets.contains_key(profile.name()) {
            return Err(RegistryError::DuplicateTargetName {
                name: profile.name().clone(),
            });
        }

        EndpointTemplate::parse(profile.endpoint()).map_err(|err| {
            let reason = match err {
                profile_primitives::Error::InvalidEndpoint { reason, .. } => reason,
                other => other.to_string(),
            };
            RegistryError::InvalidEndpoint {
                name: profile.name().clone(),
                reason,
            }
        })?;

        if let Some(overrides) = profile.build_overrides() {
            overrides.validate()?;
        }

        debug!(target_name = %profile.name(), "registered deploy target");
        self.targets.insert(profile.name().clone(), profile);
        Ok(())
    }

    /// Returns the profile registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownTarget`] when absent.
    pub fn get(&self, name: &str) -> RegistryResult<&TargetProfile> {
        self.targets
            .get(name)
            .ok_or_else(|| RegistryError::unknown_target(name))
    }

    /// Returns `true` if a profile is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Lists target names in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<&TargetName> {
        self.targets.keys().collect()
    }

    /// Iterates over target names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &TargetName> {
        self.targets.keys()
    }

    /// Iterates over profiles in registration order.
    pub fn profiles(&self) -> impl Iterator<Item = &TargetProfile> {
        self.targets.values()
    }

    /// Returns the number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` when no target is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Sets the global build settings.
    pub fn set_build_settings(&mut self, settings: BuildSettings) {
        debug!(
            compiler = settings.compiler_version(),
            optimizer = settings.optimizer_enabled(),
            runs = settings.optimizer_runs(),
            "configured build settings"
        );
        self.build = Some(settings);
    }

    /// Returns the global build settings.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::BuildSettingsNotConfigured`] if none were set.
    pub fn build_settings(&self) -> RegistryResult<&BuildSettings> {
        self.build
            .as_ref()
            .ok_or(RegistryError::BuildSettingsNotConfigured)
    }

    /// Sets the explorer API key reference used by targets that declare none.
    pub fn set_default_explorer_key(&mut self, reference: SecretRef) {
        self.default_explorer_key = Some(reference);
    }

    /// Returns the registry-wide explorer API key reference.
    #[must_use]
    pub fn default_explorer_key(&self) -> Option<&SecretRef> {
        self.default_explorer_key.as_ref()
    }

    /// Marks a registered target as the default.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownTarget`] if `name` is not registered.
    pub fn set_default_target(&mut self, name: &str) -> RegistryResult<()> {
        let (name, _) = self
            .targets
            .get_key_value(name)
            .ok_or_else(|| RegistryError::unknown_target(name))?;
        self.default_target = Some(name.clone());
        Ok(())
    }

    /// Returns the explicit default target, or the first registered one.
    #[must_use]
    pub fn default_target(&self) -> Option<&TargetName> {
        self.default_target
            .as_ref()
            .or_else(|| self.targets.keys().next())
    }

    /// Returns the default target only if one was set explicitly.
    #[must_use]
    pub fn explicit_default_target(&self) -> Option<&TargetName> {
        self.default_target.as_ref()
    }
}
