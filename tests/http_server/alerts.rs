use alert_dashboard::store::AlertStore;

use crate::helpers::*;

#[tokio::test]
async fn alerts_endpoint_returns_all_alerts_in_dataset_order() {
    let server = TestServer::with_sample_alerts().await;

    let resp = server.get("/api/alerts").await;

    assert_eq!(resp.status(), 200);
    let body = json_body(resp).await;
    assert_eq!(body["total"], 8);
    assert_eq!(
        ids(&body),
        vec!["a-001", "a-002", "a-003", "a-004", "a-005", "a-006", "a-007", "a-008"]
    );

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_serializes_wire_shape() {
    let server = TestServer::with_sample_alerts().await;

    let body = json_body(server.get("/api/alerts?subject=storage").await).await;
    let raid = &body["data"][1];

    assert_eq!(raid["id"], "a-008");
    assert_eq!(raid["severity"], "CRITICAL");
    assert_eq!(raid["timestamp"], "2024-04-22T17:20:00Z");
    assert_eq!(raid["metadata"]["deviceId"], "nas-01");
    assert_eq!(raid["metadata"]["location"], "Paris DC1");
    assert_eq!(raid["metadata"]["failedDisks"][0], "sdb");

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_filters_by_subject() {
    let server = TestServer::with_sample_alerts().await;

    let body = json_body(server.get("/api/alerts?subject=network").await).await;

    assert_eq!(body["total"], 4);
    assert_eq!(ids(&body), vec!["a-001", "a-003", "a-005", "a-007"]);

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_filters_by_month_regardless_of_subject() {
    let server = TestServer::with_sample_alerts().await;

    let body = json_body(server.get("/api/alerts?month=3&year=2024").await).await;

    assert_eq!(body["total"], 4);
    assert_eq!(ids(&body), vec!["a-003", "a-004", "a-005", "a-006"]);
    for alert in body["data"].as_array().unwrap() {
        assert!(alert["timestamp"].as_str().unwrap().starts_with("2024-03"));
    }

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_combines_subject_and_month() {
    let server = TestServer::with_sample_alerts().await;

    let body = json_body(server.get("/api/alerts?subject=network&month=03&year=2024").await).await;

    assert_eq!(ids(&body), vec!["a-003", "a-005"]);
    assert_eq!(body["total"], 2);

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_ignores_month_without_year() {
    let server = TestServer::with_sample_alerts().await;

    let only_month = json_body(server.get("/api/alerts?month=3").await).await;
    let only_year = json_body(server.get("/api/alerts?year=2024").await).await;

    assert_eq!(only_month["total"], 8);
    assert_eq!(only_year["total"], 8);

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_out_of_range_month_is_empty_not_error() {
    let server = TestServer::with_sample_alerts().await;

    for query in ["month=1&year=1999", "month=13&year=2024", "month=march&year=2024"] {
        let resp = server.get(&format!("/api/alerts?{}", query)).await;
        assert_eq!(resp.status(), 200, "query {}", query);
        let body = json_body(resp).await;
        assert_eq!(body["total"], 0, "query {}", query);
        assert_eq!(body["data"], serde_json::json!([]));
    }

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_unknown_subject_is_empty() {
    let server = TestServer::with_sample_alerts().await;

    let body = json_body(server.get("/api/alerts?subject=printer").await).await;

    assert_eq!(body["total"], 0);

    server.cleanup();
}

#[tokio::test]
async fn alert_by_id_returns_alert() {
    let server = TestServer::with_sample_alerts().await;

    let resp = server.get("/api/alerts/a-005").await;

    assert_eq!(resp.status(), 200);
    let body = json_body(resp).await;
    assert_eq!(body["data"]["id"], "a-005");
    assert_eq!(body["data"]["title"], "BGP session flapping");
    assert_eq!(body["data"]["subject"], "network");

    server.cleanup();
}

#[tokio::test]
async fn alert_by_id_returns_404_for_unknown_id() {
    let server = TestServer::with_sample_alerts().await;

    let resp = server.get("/api/alerts/does-not-exist").await;

    assert_eq!(resp.status(), 404);
    let body = json_body(resp).await;
    assert_eq!(body, serde_json::json!({ "error": "Alert not found" }));

    server.cleanup();
}

#[tokio::test]
async fn empty_store_yields_empty_results() {
    let server = TestServer::new(AlertStore::default()).await;

    let alerts = json_body(server.get("/api/alerts").await).await;
    assert_eq!(alerts["total"], 0);

    let stats = json_body(server.get("/api/alerts/stats/monthly").await).await;
    assert_eq!(stats["data"], serde_json::json!([]));

    let subjects = json_body(server.get("/api/subjects").await).await;
    assert_eq!(subjects["data"], serde_json::json!([]));

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_reads_leading_integer_of_month_and_year() {
    let server = TestServer::with_sample_alerts().await;

    for query in ["month=3.0&year=2024", "month=3&year=2024.0", "month=3abc&year=2024"] {
        let resp = server.get(&format!("/api/alerts?{}", query)).await;
        assert_eq!(resp.status(), 200, "query {}", query);
        let body = json_body(resp).await;
        assert_eq!(ids(&body), vec!["a-003", "a-004", "a-005", "a-006"], "query {}", query);
    }

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_repeated_subject_matches_nothing() {
    let server = TestServer::with_sample_alerts().await;

    let resp = server.get("/api/alerts?subject=network&subject=storage").await;

    assert_eq!(resp.status(), 200);
    let body = json_body(resp).await;
    assert_eq!(body, serde_json::json!({ "data": [], "total": 0 }));

    server.cleanup();
}

#[tokio::test]
async fn alerts_endpoint_tolerates_odd_query_strings() {
    let server = TestServer::with_sample_alerts().await;

    for query in ["subject=%ZZ", "&&=x&month", "unknown=1&subject=network&subject="] {
        let resp = server.get(&format!("/api/alerts?{}", query)).await;
        assert_eq!(resp.status(), 200, "query {}", query);
        assert!(json_body(resp).await["data"].is_array(), "query {}", query);
    }

    server.cleanup();
}
