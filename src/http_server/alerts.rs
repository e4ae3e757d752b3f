//! Handlers for alert-related endpoints in the HTTP server.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use super::{
    ApiError, ApiState, DataResponse, ListResponse,
    params::{AlertQuery, SubjectParam},
};
use crate::{
    models::Alert,
    query::{filter_by_subject, group_by_month},
};

/// Lists alerts, optionally filtered by subject and by month.
pub async fn list_alerts(
    State(state): State<ApiState>,
    query: AlertQuery,
) -> Result<Response, ApiError> {
    let alerts: Vec<&Alert> = match query.alert_filter() {
        Some(filter) => {
            tracing::debug!(subject = ?filter.subject(), period = ?filter.period, "Listing alerts.");
            filter.apply(state.store.all())
        }
        None => {
            tracing::debug!("Repeated subject parameter, no alert can match.");
            Vec::new()
        }
    };

    let total = alerts.len();

    // The records borrow from the store, so serialize before `state` goes away.
    Ok((StatusCode::OK, Json(ListResponse { data: alerts, total })).into_response())
}

/// Retrieves a single alert by its id.
pub async fn get_alert(
    State(state): State<ApiState>,
    Path(alert_id): Path<String>,
) -> Result<Response, ApiError> {
    let alert = state
        .store
        .get(&alert_id)
        .ok_or_else(|| ApiError::NotFound("Alert not found".to_string()))?;

    Ok((StatusCode::OK, Json(DataResponse { data: alert })).into_response())
}

/// Returns alert counts per month, optionally for one subject.
pub async fn monthly_stats(
    State(state): State<ApiState>,
    query: AlertQuery,
) -> Result<impl IntoResponse, ApiError> {
    let stats = match query.subject() {
        SubjectParam::Any => group_by_month(state.store.all()),
        SubjectParam::Only(subject) => group_by_month(filter_by_subject(state.store.all(), subject)),
        SubjectParam::Unmatchable => Vec::new(),
    };

    Ok((StatusCode::OK, Json(DataResponse { data: stats })))
}
