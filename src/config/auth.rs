use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    deserialize_duration_from_ms, deserialize_duration_from_seconds, serialize_duration_to_ms,
    serialize_duration_to_seconds,
};

/// Configuration for bearer token validation against the identity provider.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AuthConfig {
    /// Base URL of the token issuer, e.g. `https://tenant.eu.auth0.com/`.
    /// Falls back to `https://$AUTH0_DOMAIN/`.
    #[serde(default = "default_issuer_base_url")]
    pub issuer_base_url: String,

    /// Expected `aud` claim. Falls back to the `AUTH0_AUDIENCE` env var.
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Where to fetch the signing keys from. Defaults to the issuer's
    /// `.well-known/jwks.json`.
    #[serde(default)]
    pub jwks_uri: Option<String>,

    /// How long fetched signing keys are trusted before being refetched.
    #[serde(
        default = "default_jwks_cache_ttl",
        deserialize_with = "deserialize_duration_from_seconds",
        serialize_with = "serialize_duration_to_seconds"
    )]
    pub jwks_cache_ttl: Duration,

    /// Upper bound on the time spent validating one token, key retrieval
    /// included.
    #[serde(
        default = "default_verify_timeout",
        deserialize_with = "deserialize_duration_from_ms",
        serialize_with = "serialize_duration_to_ms"
    )]
    pub verify_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer_base_url: default_issuer_base_url(),
            audience: default_audience(),
            jwks_uri: None,
            jwks_cache_ttl: default_jwks_cache_ttl(),
            verify_timeout: default_verify_timeout(),
        }
    }
}

impl AuthConfig {
    /// The issuer URL, always ending with `/`.
    pub fn issuer(&self) -> Result<Url, url::ParseError> {
        let mut issuer = Url::parse(&self.issuer_base_url)?;
        if !issuer.path().ends_with('/') {
            let path = format!("{}/", issuer.path());
            issuer.set_path(&path);
        }
        Ok(issuer)
    }

    /// The JWKS endpoint, either configured or derived from the issuer.
    pub fn jwks_uri(&self) -> Result<Url, url::ParseError> {
        match &self.jwks_uri {
            Some(uri) => Url::parse(uri),
            None => self.issuer()?.join(".well-known/jwks.json"),
        }
    }
}

fn default_issuer_base_url() -> String {
    std::env::var("AUTH0_DOMAIN").map(|domain| format!("https://{}/", domain)).unwrap_or_default()
}

fn default_audience() -> String {
    std::env::var("AUTH0_AUDIENCE").unwrap_or_default()
}

fn default_jwks_cache_ttl() -> Duration {
    Duration::from_secs(600)
}

fn default_verify_timeout() -> Duration {
    Duration::from_millis(5000)
}
