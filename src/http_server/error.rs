//! Defines the custom `ApiError` type for the HTTP server.

use std::net::AddrParseError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

/// A custom error type for the API that can be converted into an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// Represents a missing or rejected bearer token.
    Unauthorized,

    /// Represents a resource that could not be found.
    NotFound(String),

    /// Represents a generic internal server error. The detail is logged and
    /// never sent to the client.
    InternalServerError(String),
}

/// Every token validation failure is reported to the client the same way;
/// the reason only goes to the logs.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::KeyFetch(_) | AuthError::Timeout | AuthError::InvalidKey(_) => {
                tracing::warn!(error = %err, "Token validation could not complete.")
            }
            _ => tracing::debug!(error = %err, "Rejected bearer token."),
        }
        ApiError::Unauthorized
    }
}

/// Implements the conversion from `ApiError` into an `axum` response.
///
/// This is the central point for mapping internal application errors to
/// user-facing HTTP responses.
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::Unauthorized =>
                (StatusCode::UNAUTHORIZED, json!({ "error": "Invalid token" })),
            ApiError::InternalServerError(err) => {
                tracing::error!("Internal server error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal server error" }))
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
        };

        (status, Json(body)).into_response()
    }
}

/// Errors that stop the HTTP server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured listen address is not a socket address.
    #[error("Invalid listen address '{address}': {source}")]
    InvalidAddress {
        /// The configured value.
        address: String,
        /// The parse failure.
        #[source]
        source: AddrParseError,
    },

    /// The configured CORS origin is not a valid header value.
    #[error("Invalid allowed origin '{0}'")]
    InvalidOrigin(String),

    /// The listener could not be bound.
    #[error("Failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    /// The server stopped with an I/O error.
    #[error("HTTP server failed: {0}")]
    Serve(#[source] std::io::Error),

    /// The server task panicked or was cancelled.
    #[error("HTTP server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
