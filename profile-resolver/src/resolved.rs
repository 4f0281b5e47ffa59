//! Fully populated profile handed to the build pipeline.

use std::fmt;

use profile_primitives::{BuildSettings, SecretValue, TargetName};
use url::Url;

/// Target profile with secret references replaced by live values.
///
/// Instances are produced per request and are never cached. The credential
/// and explorer key are zeroized when the value is dropped; the rendered
/// [`Url`] is not, so secret-bearing endpoints should not outlive the
/// deployment that needs them. `Debug` redacts every secret and shows the
/// endpoint template instead of the rendered URL when secrets were
/// substituted into it.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub(crate) name: TargetName,
    pub(crate) endpoint: Url,
    pub(crate) endpoint_template: String,
    pub(crate) endpoint_has_secrets: bool,
    pub(crate) credential: SecretValue,
    pub(crate) explorer_key: Option<SecretValue>,
    pub(crate) chain_id: Option<u64>,
    pub(crate) build: BuildSettings,
}

impl ResolvedProfile {
    /// Returns the target name.
    #[must_use]
    pub fn name(&self) -> &TargetName {
        &self.name
    }

    /// Returns the rendered RPC endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns `true` if the endpoint embeds secret material.
    #[must_use]
    pub const fn endpoint_has_secrets(&self) -> bool {
        self.endpoint_has_secrets
    }

    /// Returns the signing credential.
    #[must_use]
    pub fn credential(&self) -> &SecretValue {
        &self.credential
    }

    /// Returns the explorer verification API key, if one applies.
    #[must_use]
    pub fn explorer_key(&self) -> Option<&SecretValue> {
        self.explorer_key.as_ref()
    }

    /// Returns the declared chain identifier.
    #[must_use]
    pub const fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Returns the effective build settings for this target.
    #[must_use]
    pub fn build(&self) -> &BuildSettings {
        &self.build
    }

    /// Returns the endpoint for display.
    ///
    /// Secret-bearing endpoints are shown as their template, e.g.
    /// `https://${qnKey}.quiknode.pro/rpc`, so no substituted value is printed
    /// wherever the reference sits in the URL.
    #[must_use]
    pub fn display_endpoint(&self) -> String {
        if self.endpoint_has_secrets {
            self.endpoint_template.clone()
        } else {
            self.endpoint.to_string()
        }
    }
}

impl fmt::Debug for ResolvedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedProfile")
            .field("name", &self.name)
            .field("endpoint", &self.display_endpoint())
            .field("credential", &self.credential)
            .field("explorer_key", &self.explorer_key)
            .field("chain_id", &self.chain_id)
            .field("build", &self.build)
            .finish()
    }
}
