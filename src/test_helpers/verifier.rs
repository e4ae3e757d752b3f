//! A `TokenVerifier` that accepts exactly one opaque token.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;

use crate::auth::{AuthError, Claims, TokenVerifier};

/// The token accepted by `StaticTokenVerifier::default()`.
pub const TEST_TOKEN: &str = "test-token";

/// Accepts a single fixed token and rejects everything else.
pub struct StaticTokenVerifier {
    token: String,
    claims: Claims,
}

impl StaticTokenVerifier {
    /// Creates a verifier accepting `token`.
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            claims: Claims { sub: "test-user".to_string(), exp: u64::MAX, scope: None },
        }
    }
}

impl Default for StaticTokenVerifier {
    fn default() -> Self {
        Self::new(TEST_TOKEN)
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token == self.token {
            Ok(self.claims.clone())
        } else {
            Err(AuthError::InvalidToken(ErrorKind::InvalidToken.into()))
        }
    }
}
