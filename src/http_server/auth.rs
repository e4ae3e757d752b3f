//! Authentication middleware for the HTTP server.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Request, header},
    middleware::Next,
    response::Response,
};

use super::{ApiState, error::ApiError};
use crate::auth::AuthError;

/// Middleware for authenticating requests using a bearer token.
///
/// The validated claims are stored in the request extensions.
pub async fn auth(
    State(state): State<ApiState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Preflights are answered by the CORS layer; anything else with OPTIONS
    // carries no data and passes through.
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers()).ok_or(ApiError::Unauthorized)?;

    let claims =
        tokio::time::timeout(state.config.auth.verify_timeout, state.verifier.verify(token))
            .await
            .map_err(|_| AuthError::Timeout)??;

    tracing::debug!(sub = %claims.sub, "Request authenticated.");
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Extracts the token from an `Authorization: Bearer <token>` header. The
/// scheme is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
