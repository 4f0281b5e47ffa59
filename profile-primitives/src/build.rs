//! Compiler and code generation settings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Global compiler settings shared by every target unless overridden.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBuildSettings")]
pub struct BuildSettings {
    compiler_version: String,
    optimizer_enabled: bool,
    optimizer_runs: u32,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    output_selection: BTreeSet<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBuildSettings {
    compiler_version: String,
    #[serde(default)]
    optimizer_enabled: bool,
    #[serde(default)]
    optimizer_runs: u32,
    #[serde(default)]
    output_selection: BTreeSet<String>,
}

impl TryFrom<RawBuildSettings> for BuildSettings {
    type Error = Error;

    fn try_from(raw: RawBuildSettings) -> Result<Self> {
        let mut builder = BuildSettings::builder(raw.compiler_version)?
            .optimizer(raw.optimizer_enabled, raw.optimizer_runs);
        for artifact in raw.output_selection {
            builder = builder.add_output(artifact)?;
        }
        Ok(builder.build())
    }
}

impl BuildSettings {
    /// Starts building settings for the supplied compiler version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuildSettings`] when the version is empty.
    pub fn builder(compiler_version: impl Into<String>) -> Result<BuildSettingsBuilder> {
        let compiler_version = compiler_version.into();
        validate_version(&compiler_version)?;
        Ok(BuildSettingsBuilder {
            compiler_version,
            optimizer_enabled: false,
            optimizer_runs: 0,
            output_selection: BTreeSet::new(),
        })
    }

    /// Returns the compiler version identifier, e.g. `0.8.20`.
    #[must_use]
    pub fn compiler_version(&self) -> &str {
        &self.compiler_version
    }

    /// Returns whether the optimizer is enabled.
    #[must_use]
    pub const fn optimizer_enabled(&self) -> bool {
        self.optimizer_enabled
    }

    /// Returns the optimizer iteration count.
    #[must_use]
    pub const fn optimizer_runs(&self) -> u32 {
        self.optimizer_runs
    }

    /// Returns the output artifact kinds retained by the compiler.
    #[must_use]
    pub fn output_selection(&self) -> &BTreeSet<String> {
        &self.output_selection
    }
}

/// Builder for [`BuildSettings`].
#[derive(Debug)]
pub struct BuildSettingsBuilder {
    compiler_version: String,
    optimizer_enabled: bool,
    optimizer_runs: u32,
    output_selection: BTreeSet<String>,
}

impl BuildSettingsBuilder {
    /// Configures the optimizer toggle and run count.
    #[must_use]
    pub fn optimizer(mut self, enabled: bool, runs: u32) -> Self {
        self.optimizer_enabled = enabled;
        self.optimizer_runs = runs;
        self
    }

    /// Adds an output artifact kind, e.g. `evm.bytecode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuildSettings`] if the artifact kind is empty.
    pub fn add_output(mut self, artifact: impl Into<String>) -> Result<Self> {
        let artifact = artifact.into();
        validate_artifact(&artifact)?;
        self.output_selection.insert(artifact);
        Ok(self)
    }

    /// Finalises the settings.
    #[must_use]
    pub fn build(self) -> BuildSettings {
        BuildSettings {
            compiler_version: self.compiler_version,
            optimizer_enabled: self.optimizer_enabled,
            optimizer_runs: self.optimizer_runs,
            output_selection: self.output_selection,
        }
    }
}

/// Target-level overrides of [`BuildSettings`].
///
/// Each populated field replaces the global value; unset fields inherit it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildOverrides {
    /// Compiler version override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_version: Option<String>,
    /// Optimizer toggle override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer_enabled: Option<bool>,
    /// Optimizer run count override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer_runs: Option<u32>,
    /// Output selection override; replaces the global set as a whole.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_selection: Option<BTreeSet<String>>,
}

impl BuildOverrides {
    /// Returns `true` when no field is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Checks that populated fields would produce valid settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBuildSettings`] for an empty version or artifact kind.
    pub fn validate(&self) -> Result<()> {
        if let Some(version) = &self.compiler_version {
            validate_version(version)?;
        }
        if let Some(outputs) = &self.output_selection {
            outputs.iter().try_for_each(|artifact| validate_artifact(artifact))?;
        }
        Ok(())
    }

    /// Produces effective settings by layering these overrides on `global`.
    #[must_use]
    pub fn apply(&self, global: &BuildSettings) -> BuildSettings {
        BuildSettings {
            compiler_version: self
                .compiler_version
                .clone()
                .unwrap_or_else(|| global.compiler_version.clone()),
            optimizer_enabled: self.optimizer_enabled.unwrap_or(global.optimizer_enabled),
            optimizer_runs: self.optimizer_runs.unwrap_or(global.optimizer_runs),
            output_selection: self
                .output_selection
                .clone()
                .unwrap_or_else(|| global.output_selection.clone()),
        }
    }
}

fn validate_version(version: &str) -> Result<()> {
    if version.trim().is_empty() {
        return Err(Error::InvalidBuildSettings {
            reason: "compiler version cannot be empty".into(),
        });
    }
    Ok(())
}

fn validate_artifact(artifact: &str) -> Result<()> {
    if artifact.trim().is_empty() {
        return Err(Error::InvalidBuildSettings {
            reason: "output artifact kind cannot be empty".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global() -> BuildSettings {
        BuildSettings::builder("0.8.20")
            .map(|b| b.optimizer(true, 1000))
            .and_then(|b| b.add_output("abi"))
            .and_then(|b| b.add_output("evm.bytecode"))
            .map(BuildSettingsBuilder::build)
            .expect("settings")
    }

    #[test]
    fn overrides_inherit_unset_fields() {
        let overrides = BuildOverrides {
            optimizer_runs: Some(5000),
            ..BuildOverrides::default()
        };
        let effective = overrides.apply(&global());

        assert_eq!(effective.optimizer_runs(), 5000);
        assert!(effective.optimizer_enabled());
        assert_eq!(effective.compiler_version(), "0.8.20");
        assert_eq!(effective.output_selection().len(), 2);
    }

    #[test]
    fn empty_overrides_are_identity() {
        let overrides = BuildOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(overrides.apply(&global()), global());
    }

    #[test]
    fn version_is_required() {
        let err = BuildSettings::builder(" ").expect_err("empty version");
        assert!(matches!(err, Error::InvalidBuildSettings { .. }));
    }

    #[test]
    fn deserialization_validates() {
        let parsed: BuildSettings = serde_json::from_str(
            r#"{"compiler_version":"0.8.20","optimizer_enabled":true,"optimizer_runs":1000,
                "output_selection":["abi","metadata"]}"#,
        )
        .expect("valid");
        assert_eq!(parsed.optimizer_runs(), 1000);

        let invalid = serde_json::from_str::<BuildSettings>(r#"{"compiler_version":""}"#);
        assert!(invalid.is_err());

        let unknown = serde_json::from_str::<BuildSettings>(
            r#"{"compiler_version":"0.8.20","optimiser":true}"#,
        );
        assert!(unknown.is_err());
    }

    #[test]
    fn override_validation_rejects_blank_fields() {
        let overrides = BuildOverrides {
            output_selection: Some(BTreeSet::from([String::new()])),
            ..BuildOverrides::default()
        };
        assert!(overrides.validate().is_err());
    }
}
