//! Endpoint URL templates.
//!
//! An endpoint is an absolute URL that may embed secret references written as
//! `${name}`, e.g. `https://mainnet.infura.io/v3/${infuraKey}`. References are
//! substituted during resolution so that RPC API keys never live in a profile
//! definition. Any other placeholder-looking token (`{...}`, `<...>`, a bare
//! `$`) is treated as an unfilled template and rejected.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use url::Url;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::ids::{SecretRef, is_secret_ref_char};
use crate::secret::SecretValue;

const VALIDATION_FILLER: &str = "placeholder";

/// Piece of a parsed endpoint template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndpointSegment {
    /// Literal URL text.
    Literal(String),
    /// Secret reference substituted at resolution time.
    Secret(SecretRef),
}

/// Validated endpoint template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointTemplate {
    raw: String,
    segments: Vec<EndpointSegment>,
}

impl EndpointTemplate {
    /// Parses and validates an endpoint template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] when the endpoint is empty, contains an
    /// unresolved placeholder, or is not an absolute URL with a host.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(Error::endpoint(raw, "endpoint cannot be empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(Error::endpoint(raw, "endpoint cannot contain whitespace"));
        }

        let segments = tokenize(raw)?;
        let template = Self {
            raw: raw.to_owned(),
            segments,
        };

        let mut probe = String::with_capacity(raw.len());
        for segment in &template.segments {
            match segment {
                EndpointSegment::Literal(text) => probe.push_str(text),
                EndpointSegment::Secret(_) => probe.push_str(VALIDATION_FILLER),
            }
        }
        template.check_url(&probe)?;

        Ok(template)
    }

    /// Returns the endpoint as written in the definition.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[EndpointSegment] {
        &self.segments
    }

    /// Iterates over the secret references embedded in the endpoint.
    pub fn secret_refs(&self) -> impl Iterator<Item = &SecretRef> {
        self.segments.iter().filter_map(|segment| match segment {
            EndpointSegment::Secret(reference) => Some(reference),
            EndpointSegment::Literal(_) => None,
        })
    }

    /// Returns `true` when rendering requires secret values.
    #[must_use]
    pub fn has_secrets(&self) -> bool {
        self.secret_refs().next().is_some()
    }

    /// Substitutes secret values and parses the resulting URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if a referenced secret is missing from
    /// `secrets` or the rendered text is not a valid absolute URL. Error text
    /// only ever includes the template, never substituted values.
    pub fn render(&self, secrets: &BTreeMap<SecretRef, SecretValue>) -> Result<Url> {
        let mut rendered = Zeroizing::new(String::with_capacity(self.raw.len()));
        for segment in &self.segments {
            match segment {
                EndpointSegment::Literal(text) => rendered.push_str(text),
                EndpointSegment::Secret(reference) => {
                    let value = secrets.get(reference).ok_or_else(|| {
                        Error::endpoint(&self.raw, format!("no value supplied for `${{{reference}}}`"))
                    })?;
                    rendered.push_str(value.expose());
                }
            }
        }
        self.check_url(&rendered)
    }

    fn check_url(&self, candidate: &str) -> Result<Url> {
        let url = Url::parse(candidate).map_err(|err| Error::endpoint(&self.raw, err.to_string()))?;
        if !url.has_host() {
            return Err(Error::endpoint(&self.raw, "endpoint must be an absolute URL with a host"));
        }
        Ok(url)
    }
}

impl Display for EndpointTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for EndpointTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn tokenize(raw: &str) -> Result<Vec<EndpointSegment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = raw.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        match c {
            '$' => {
                if !matches!(chars.peek(), Some((_, '{'))) {
                    return Err(Error::endpoint(raw, format!("stray `$` at offset {idx}")));
                }
                chars.next();

                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(Error::endpoint(raw, format!("unterminated placeholder at offset {idx}")));
                }
                if name.is_empty() || !name.chars().all(is_secret_ref_char) {
                    return Err(Error::endpoint(
                        raw,
                        format!("`${{{name}}}` is not a valid secret reference"),
                    ));
                }
                let reference = SecretRef::new(name)
                    .map_err(|err| Error::endpoint(raw, err.to_string()))?;

                if !literal.is_empty() {
                    segments.push(EndpointSegment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(EndpointSegment::Secret(reference));
            }
            '{' | '}' | '<' | '>' => {
                return Err(Error::endpoint(
                    raw,
                    format!("unresolved placeholder token `{c}` at offset {idx}"),
                ));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(EndpointSegment::Literal(literal));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_urls() {
        let template = EndpointTemplate::parse("https://arb1.arbitrum.io/rpc").expect("valid");
        assert!(!template.has_secrets());
        let url = template.render(&BTreeMap::new()).expect("render");
        assert_eq!(url.host_str(), Some("arb1.arbitrum.io"));
        assert_eq!(url.path(), "/rpc");
    }

    #[test]
    fn keeps_explicit_ports() {
        let template =
            EndpointTemplate::parse("https://data-seed-prebsc-1-s2.binance.org:8545/").expect("valid");
        let url = template.render(&BTreeMap::new()).expect("render");
        assert_eq!(url.port(), Some(8545));
    }

    #[test]
    fn rejects_unfilled_placeholders() {
        for raw in [
            "https://mainnet.infura.io/v3/{your eth api key}",
            "https://linea-mainnet.infura.io/v3/<api key>",
            "https://linea-mainnet.infura.io/v3/<apikey>",
            "https://mainnet.infura.io/v3/{key}",
            "https://mainnet.infura.io/v3/$key",
            "https://mainnet.infura.io/v3/${key",
            "https://mainnet.infura.io/v3/${}",
        ] {
            let err = EndpointTemplate::parse(raw).expect_err(raw);
            assert!(matches!(err, Error::InvalidEndpoint { .. }), "{raw}");
        }
    }

    #[test]
    fn rejects_empty_and_relative_endpoints() {
        assert!(EndpointTemplate::parse("").is_err());
        assert!(EndpointTemplate::parse("   ").is_err());
        assert!(EndpointTemplate::parse("/rpc").is_err());
        assert!(EndpointTemplate::parse("mainnet.aurora.dev").is_err());
        assert!(EndpointTemplate::parse("mailto:ops@example.com").is_err());
    }

    #[test]
    fn substitutes_secret_references() {
        let template =
            EndpointTemplate::parse("https://mainnet.infura.io/v3/${infuraKey}").expect("valid");
        let refs: Vec<_> = template.secret_refs().map(SecretRef::as_str).collect();
        assert_eq!(refs, ["infuraKey"]);

        let mut secrets = BTreeMap::new();
        secrets.insert(SecretRef::new("infuraKey").unwrap(), SecretValue::new("abc123"));
        let url = template.render(&secrets).expect("render");
        assert_eq!(url.as_str(), "https://mainnet.infura.io/v3/abc123");
    }

    #[test]
    fn render_without_value_does_not_leak() {
        let template =
            EndpointTemplate::parse("https://mainnet.infura.io/v3/${infuraKey}").expect("valid");
        let err = template.render(&BTreeMap::new()).expect_err("missing");
        assert!(err.to_string().contains("infuraKey"));
    }

    #[test]
    fn rendered_value_must_keep_url_valid() {
        let template = EndpointTemplate::parse("https://${host}/rpc").expect("valid");
        let mut secrets = BTreeMap::new();
        secrets.insert(SecretRef::new("host").unwrap(), SecretValue::new("bad host"));
        let err = template.render(&secrets).expect_err("invalid host");
        assert!(!err.to_string().contains("bad host"));
    }
}
