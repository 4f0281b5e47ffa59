//! Static registry definitions in JSON or TOML.
//!
//! A definition lists targets as an array so that registration order is the
//! file order and repeated names surface as [`RegistryError::DuplicateTargetName`]
//! instead of being collapsed by a map parser.
//!
//! ```toml
//! explorer_key = "apiKey"
//!
//! [build]
//! compiler_version = "0.8.20"
//! optimizer_enabled = true
//! optimizer_runs = 1000
//! output_selection = ["abi", "evm.bytecode"]
//!
//! [[targets]]
//! name = "arbitrum"
//! endpoint = "https://arb1.arbitrum.io/rpc"
//! credential = "pk"
//! ```

use std::path::Path;

use profile_primitives::{BuildSettings, SecretRef, TargetName, TargetProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::registry::ProfileRegistry;

/// Serializable form of a [`ProfileRegistry`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryDefinition {
    /// Global build settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSettings>,
    /// Registry-wide explorer API key reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_key: Option<SecretRef>,
    /// Explicit default target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target: Option<TargetName>,
    /// Targets in registration order.
    #[serde(default)]
    pub targets: Vec<TargetProfile>,
}

impl ProfileRegistry {
    /// Builds a registry from a definition, registering targets in order.
    ///
    /// # Errors
    ///
    /// Returns the first registration error encountered; no partially
    /// populated registry is returned.
    pub fn from_definition(definition: RegistryDefinition) -> RegistryResult<Self> {
        let RegistryDefinition {
            build,
            explorer_key,
            default_target,
            targets,
        } = definition;

        let mut registry = Self::new();
        for profile in targets {
            registry.register(profile)?;
        }
        if let Some(settings) = build {
            registry.set_build_settings(settings);
        }
        if let Some(reference) = explorer_key {
            registry.set_default_explorer_key(reference);
        }
        if let Some(name) = default_target {
            registry.set_default_target(name.as_str())?;
        }
        Ok(registry)
    }

    /// Parses a JSON definition.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] for malformed JSON or any registration error.
    pub fn from_json_str(source: &str) -> RegistryResult<Self> {
        let definition: RegistryDefinition =
            serde_json::from_str(source).map_err(|err| RegistryError::Parse {
                reason: err.to_string(),
            })?;
        Self::from_definition(definition)
    }

    /// Parses a TOML definition.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] for malformed TOML or any registration error.
    pub fn from_toml_str(source: &str) -> RegistryResult<Self> {
        let definition: RegistryDefinition =
            toml::from_str(source).map_err(|err| RegistryError::Parse {
                reason: err.to_string(),
            })?;
        Self::from_definition(definition)
    }

    /// Loads a definition file, choosing the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnsupportedFormat`] for extensions other than
    /// `.json` and `.toml`, [`RegistryError::Io`] when the file cannot be read,
    /// and any parse or registration error.
    pub fn load(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> RegistryResult<Self> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => {
                return Err(RegistryError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let source = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = parse(&source)?;
        debug!(path = %path.display(), targets = registry.len(), "loaded registry definition");
        Ok(registry)
    }

    /// Returns the serializable definition of this registry.
    #[must_use]
    pub fn to_definition(&self) -> RegistryDefinition {
        RegistryDefinition {
            build: self.build_settings().ok().cloned(),
            explorer_key: self.default_explorer_key().cloned(),
            default_target: self.explicit_default_target().cloned(),
            targets: self.profiles().cloned().collect(),
        }
    }
}
