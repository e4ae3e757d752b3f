use std::sync::Arc;

use alert_dashboard::{auth::JwksVerifier, test_helpers::{TEST_ORIGIN, sample_store}};
use reqwest::{Method, header};

use crate::{helpers::*, jwt};

#[tokio::test]
async fn api_routes_require_authorization_header() {
    let server = TestServer::with_sample_alerts().await;

    for path in [
        "/api/alerts",
        "/api/alerts/a-001",
        "/api/alerts/stats/monthly",
        "/api/subjects",
        "/api/unknown",
    ] {
        let resp = server.get_anonymous(path).await;
        assert_eq!(resp.status(), 401, "path {}", path);
        assert_eq!(json_body(resp).await["error"], "Invalid token", "path {}", path);
    }

    server.cleanup();
}

#[tokio::test]
async fn api_rejects_wrong_token_and_wrong_scheme() {
    let server = TestServer::with_sample_alerts().await;

    let resp =
        server.request(Method::GET, "/api/alerts").bearer_auth("invalid-key").send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let resp = server
        .request(Method::GET, "/api/alerts")
        .basic_auth("admin", Some("admin"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    server.cleanup();
}

#[tokio::test]
async fn preflight_is_answered_without_credentials() {
    let server = TestServer::with_sample_alerts().await;

    let resp = server
        .request(Method::OPTIONS, "/api/alerts")
        .header(header::ORIGIN, TEST_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_success());
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], TEST_ORIGIN);

    server.cleanup();
}

#[tokio::test]
async fn cors_always_advertises_the_configured_origin() {
    let server = TestServer::with_sample_alerts().await;

    let allowed = server
        .request(Method::GET, "/health")
        .header(header::ORIGIN, TEST_ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], TEST_ORIGIN);

    let foreign = server
        .request(Method::GET, "/health")
        .header(header::ORIGIN, "https://evil.example.com")
        .send()
        .await
        .unwrap();
    // The browser compares the advertised origin with its own and blocks.
    let advertised = &foreign.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN];
    assert_eq!(advertised, TEST_ORIGIN);
    assert_ne!(advertised, "https://evil.example.com");

    server.cleanup();
}

#[tokio::test]
async fn signed_token_is_accepted_end_to_end() {
    let mut idp = mockito::Server::new_async().await;
    let jwks = jwt::jwks_endpoint(&mut idp, 1).await;
    let verifier = JwksVerifier::from_config(&jwt::auth_config(&idp)).unwrap();
    let server = TestServer::with_verifier(sample_store(), Arc::new(verifier)).await;

    let token = jwt::sign(&jwt::claims(&jwt::issuer(&idp)), Some(jwt::SIGNING_KEY_ID));

    for path in ["/api/subjects", "/api/alerts/a-002"] {
        let resp = server.request(Method::GET, path).bearer_auth(&token).send().await.unwrap();
        assert_eq!(resp.status(), 200, "path {}", path);
    }

    let mut expired = jwt::claims(&jwt::issuer(&idp));
    expired["exp"] = (jwt::now() - 3600).into();
    let resp = server
        .request(Method::GET, "/api/subjects")
        .bearer_auth(jwt::sign(&expired, Some(jwt::SIGNING_KEY_ID)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    jwks.assert_async().await;
    server.cleanup();
}
