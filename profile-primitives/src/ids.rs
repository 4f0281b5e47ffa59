//! Identifier types for targets and secret references.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_TARGET_LEN: usize = 64;
const MAX_SECRET_REF_LEN: usize = 128;

/// Unique name of a deployment target, e.g. `arbitrum` or `bscTest`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetName(String);

impl TargetName {
    /// Creates a target name after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTargetName`] if the name is empty, too long, or
    /// contains characters outside `[A-Za-z0-9._-]`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if let Err(reason) = validate(&name, MAX_TARGET_LEN, |c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
        }) {
            return Err(Error::InvalidTargetName { name, reason });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque reference to a secret held by a secret provider.
///
/// The reference is a name, never the secret value. Slashes are accepted so
/// vault-style paths such as `deploy/signing-key` can be used directly.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecretRef(String);

impl SecretRef {
    /// Creates a secret reference after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSecretRef`] if the reference is empty, too long,
    /// or contains characters outside `[A-Za-z0-9._/-]`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if let Err(reason) = validate(&name, MAX_SECRET_REF_LEN, is_secret_ref_char) {
            return Err(Error::InvalidSecretRef { name, reason });
        }
        Ok(Self(name))
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub(crate) fn is_secret_ref_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')
}

fn validate(
    value: &str,
    max_len: usize,
    allowed: impl Fn(char) -> bool,
) -> std::result::Result<(), String> {
    if value.is_empty() {
        return Err("identifier cannot be empty".into());
    }
    if value.len() > max_len {
        return Err(format!("identifier length must be <= {max_len}"));
    }
    if let Some(c) = value.chars().find(|c| !allowed(*c)) {
        return Err(format!("unsupported character `{c}`"));
    }
    Ok(())
}

macro_rules! string_newtype_impls {
    ($ty:ident) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $ty {
            type Error = Error;

            fn try_from(value: &str) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_newtype_impls!(TargetName);
string_newtype_impls!(SecretRef);
