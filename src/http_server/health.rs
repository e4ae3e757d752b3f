//! Liveness endpoint. It sits outside `/api` and needs no credentials.

use axum::response::{IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

/// Reports that the process is up, with the current server time.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
