//! Token validation against a JSON Web Key Set published by the identity
//! provider.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{
    Algorithm, DecodingKey, Validation, decode, decode_header,
    jwk::{Jwk, JwkSet},
};
use tokio::{sync::RwLock, time::Instant};
use url::Url;

use super::{AuthError, Claims, TokenVerifier};
use crate::config::AuthConfig;

/// An unknown key id only triggers a refetch if the cached set is at least
/// this old.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

struct CachedKeySet {
    keys: JwkSet,
    fetched_at: Instant,
}

enum Lookup {
    Found(DecodingKey),
    Absent,
    Refresh,
}

/// Verifies RS256 tokens with keys fetched from the provider's JWKS
/// endpoint. Keys are cached for the configured TTL.
pub struct JwksVerifier {
    client: reqwest::Client,
    jwks_uri: Url,
    validation: Validation,
    cache_ttl: Duration,
    keys: RwLock<Option<CachedKeySet>>,
}

impl JwksVerifier {
    /// Builds a verifier from the auth configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let issuer = config.issuer().map_err(|e| {
            AuthError::Misconfigured(format!(
                "invalid issuer_base_url '{}': {}",
                config.issuer_base_url, e
            ))
        })?;

        if config.audience.is_empty() {
            return Err(AuthError::Misconfigured("audience must be set".to_string()));
        }

        let jwks_uri = config
            .jwks_uri()
            .map_err(|e| AuthError::Misconfigured(format!("invalid jwks_uri: {}", e)))?;

        let client = reqwest::Client::builder().timeout(config.verify_timeout).build()?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_issuer(&[issuer.as_str()]);

        tracing::debug!(issuer = %issuer, jwks_uri = %jwks_uri, "Token verifier configured.");

        Ok(Self { client, jwks_uri, validation, cache_ttl: config.jwks_cache_ttl, keys: RwLock::new(None) })
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        match self.lookup(self.keys.read().await.as_ref(), kid)? {
            Lookup::Found(key) => return Ok(key),
            Lookup::Absent => return Err(AuthError::UnknownKey(kid.to_string())),
            Lookup::Refresh => {}
        }

        let mut cache = self.keys.write().await;

        // Another request may have refreshed the set while we waited.
        match self.lookup(cache.as_ref(), kid)? {
            Lookup::Found(key) => return Ok(key),
            Lookup::Absent => return Err(AuthError::UnknownKey(kid.to_string())),
            Lookup::Refresh => {}
        }

        let keys = self.fetch().await?;
        let key = keys.find(kid).map(decoding_key_from_jwk).transpose()?;
        *cache = Some(CachedKeySet { keys, fetched_at: Instant::now() });

        key.ok_or_else(|| AuthError::UnknownKey(kid.to_string()))
    }

    fn lookup(&self, cached: Option<&CachedKeySet>, kid: &str) -> Result<Lookup, AuthError> {
        let Some(cached) = cached else {
            return Ok(Lookup::Refresh);
        };

        let age = cached.fetched_at.elapsed();
        if age >= self.cache_ttl {
            return Ok(Lookup::Refresh);
        }

        match cached.keys.find(kid) {
            Some(jwk) => Ok(Lookup::Found(decoding_key_from_jwk(jwk)?)),
            None if age < MIN_REFRESH_INTERVAL => Ok(Lookup::Absent),
            None => Ok(Lookup::Refresh),
        }
    }

    async fn fetch(&self) -> Result<JwkSet, AuthError> {
        tracing::debug!(jwks_uri = %self.jwks_uri, "Fetching signing keys...");

        let keys = self
            .client
            .get(self.jwks_uri.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;

        tracing::info!(count = keys.keys.len(), "Signing keys refreshed.");
        Ok(keys)
    }
}

fn decoding_key_from_jwk(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    DecodingKey::from_jwk(jwk).map_err(AuthError::InvalidKey)
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;
        let key = self.decoding_key(&kid).await?;

        let data = decode::<Claims>(token, &key, &self.validation)?;
        Ok(data.claims)
    }
}
