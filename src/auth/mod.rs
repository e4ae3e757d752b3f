//! Bearer token validation.
//!
//! Trust decisions are delegated to the identity provider: a token is valid
//! when it is signed by one of the provider's published keys and carries the
//! configured audience and issuer.

mod jwks;

use async_trait::async_trait;
pub use jwks::JwksVerifier;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The claims the API relies on once a token has been validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject the token was issued to.
    pub sub: String,

    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,

    /// Space-separated scopes granted to the token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Errors that can occur while validating a bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token header has no `kid`, so no signing key can be selected.
    #[error("Token header has no key id")]
    MissingKeyId,

    /// The identity provider does not publish a key with this id.
    #[error("No signing key found for key id '{0}'")]
    UnknownKey(String),

    /// The key set could not be retrieved.
    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),

    /// A published key could not be turned into a decoding key.
    #[error("Unusable signing key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    /// Signature, expiry, audience or issuer validation failed.
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Validation did not finish within the configured timeout.
    #[error("Token validation timed out")]
    Timeout,

    /// The verifier cannot be built from the current configuration.
    #[error("Auth misconfigured: {0}")]
    Misconfigured(String),
}

/// Validates bearer tokens presented to the API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Returns the token's claims if it is valid.
    async fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}
