//! Handler for the subject listing.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};

use super::{ApiError, ApiState, DataResponse};
use crate::query::distinct_subjects;

/// Lists the distinct alert subjects, sorted ascending.
pub async fn list_subjects(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let subjects = distinct_subjects(state.store.all());
    Ok((StatusCode::OK, Json(DataResponse { data: subjects })))
}
