//! Declared deployment target profile.

use serde::{Deserialize, Serialize};

use crate::build::BuildOverrides;
use crate::error::{Error, Result};
use crate::ids::{SecretRef, TargetName};

/// Connection and build parameters for one deployment target.
///
/// A profile only ever holds [`SecretRef`]s; secret values are merged in by
/// the resolver. The endpoint is kept as written so that the registry can
/// validate it and report the offending target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetProfile {
    name: TargetName,
    endpoint: String,
    credential: SecretRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explorer_key: Option<SecretRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    build: Option<BuildOverrides>,
}

impl TargetProfile {
    /// Starts building a profile for the supplied target.
    #[must_use]
    pub fn builder(name: TargetName) -> TargetProfileBuilder {
        TargetProfileBuilder {
            name,
            endpoint: None,
            credential: None,
            explorer_key: None,
            chain_id: None,
            build: None,
        }
    }

    /// Returns the target name.
    #[must_use]
    pub fn name(&self) -> &TargetName {
        &self.name
    }

    /// Returns the endpoint text, possibly containing `${secret}` references.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the signing credential reference.
    #[must_use]
    pub fn credential(&self) -> &SecretRef {
        &self.credential
    }

    /// Returns the target-specific explorer API key reference, if any.
    #[must_use]
    pub fn explorer_key(&self) -> Option<&SecretRef> {
        self.explorer_key.as_ref()
    }

    /// Returns the expected chain identifier, if declared.
    #[must_use]
    pub const fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Returns the build overrides, if any.
    #[must_use]
    pub fn build_overrides(&self) -> Option<&BuildOverrides> {
        self.build.as_ref()
    }
}

/// Builder for [`TargetProfile`].
#[derive(Debug)]
pub struct TargetProfileBuilder {
    name: TargetName,
    endpoint: Option<String>,
    credential: Option<SecretRef>,
    explorer_key: Option<SecretRef>,
    chain_id: Option<u64>,
    build: Option<BuildOverrides>,
}

impl TargetProfileBuilder {
    /// Sets the RPC endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the signing credential reference.
    #[must_use]
    pub fn credential(mut self, credential: SecretRef) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Sets a target-specific explorer API key reference.
    #[must_use]
    pub fn explorer_key(mut self, explorer_key: SecretRef) -> Self {
        self.explorer_key = Some(explorer_key);
        self
    }

    /// Declares the chain identifier the endpoint is expected to serve.
    #[must_use]
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Sets build overrides layered on the global settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuildSettings`] when an override field is blank.
    pub fn build_overrides(mut self, overrides: BuildOverrides) -> Result<Self> {
        overrides.validate()?;
        self.build = (!overrides.is_empty()).then_some(overrides);
        Ok(self)
    }

    /// Finalises the profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProfile`] if the endpoint or credential is missing.
    pub fn build(self) -> Result<TargetProfile> {
        let endpoint = self.endpoint.ok_or_else(|| Error::InvalidProfile {
            reason: format!("target `{}` must declare an endpoint", self.name),
        })?;
        let credential = self.credential.ok_or_else(|| Error::InvalidProfile {
            reason: format!("target `{}` must declare a credential reference", self.name),
        })?;

        Ok(TargetProfile {
            name: self.name,
            endpoint,
            credential,
            explorer_key: self.explorer_key,
            chain_id: self.chain_id,
            build: self.build,
        })
    }
}
