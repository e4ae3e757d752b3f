use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn subjects_endpoint_returns_sorted_distinct_subjects() {
    let server = TestServer::with_sample_alerts().await;

    let resp = server.get("/api/subjects").await;

    assert_eq!(resp.status(), 200);
    assert_eq!(json_body(resp).await, json!({ "data": ["database", "network", "storage"] }));

    server.cleanup();
}
