//! Signs tokens with the fixture RSA key and serves the matching JWKS.

#![allow(dead_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use alert_dashboard::config::AuthConfig;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use mockito::{Mock, ServerGuard};
use serde_json::json;

pub const SIGNING_KEY_ID: &str = "test-signing-key";
pub const AUDIENCE: &str = "https://alerts-api";
pub const JWKS_PATH: &str = "/.well-known/jwks.json";
pub const JWKS: &str = include_str!("../fixtures/jwks.json");
const SIGNING_KEY_PEM: &[u8] = include_bytes!("../fixtures/signing_key.pem");

pub fn now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
}

pub fn issuer(server: &ServerGuard) -> String {
    format!("{}/", server.url())
}

pub fn auth_config(server: &ServerGuard) -> AuthConfig {
    AuthConfig {
        issuer_base_url: issuer(server),
        audience: AUDIENCE.to_string(),
        ..Default::default()
    }
}

pub fn claims(issuer: &str) -> serde_json::Value {
    json!({
        "sub": "auth0|user-1",
        "aud": AUDIENCE,
        "iss": issuer,
        "iat": now(),
        "exp": now() + 3600,
    })
}

pub fn sign(claims: &serde_json::Value, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY_PEM).expect("Invalid fixture key");
    encode(&header, claims, &key).expect("Failed to sign token")
}

/// A JWKS endpoint expected to be hit exactly `fetches` times.
pub async fn jwks_endpoint(server: &mut ServerGuard, fetches: usize) -> Mock {
    server
        .mock("GET", JWKS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(JWKS)
        .expect(fetches)
        .create_async()
        .await
}
