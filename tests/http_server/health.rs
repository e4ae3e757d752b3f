use crate::helpers::*;

#[tokio::test]
async fn health_endpoint_returns_ok_without_credentials() {
    let server = TestServer::with_sample_alerts().await;

    let resp = server.get_anonymous("/health").await;

    assert_eq!(resp.status(), 200);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "OK");
    let timestamp = body["timestamp"].as_str().expect("timestamp is not a string");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());

    server.cleanup();
}
