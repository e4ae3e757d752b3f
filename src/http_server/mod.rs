//! HTTP server module

mod alerts;
mod auth;
mod error;
mod health;
mod params;
mod subjects;

use std::{any::Any, future::Future, net::SocketAddr, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
pub use error::{ApiError, ServerError};
pub use params::{AlertQuery, SubjectParam};
use serde::Serialize;
use tokio::{net::TcpListener, signal, sync::watch};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{auth::TokenVerifier, config::AppConfig, store::AlertStore};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The alert store, loaded once at startup.
    pub store: AlertStore,
    /// Validates bearer tokens for `/api` routes.
    pub verifier: Arc<dyn TokenVerifier>,
}

/// `{ "data": ... }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    /// The payload.
    pub data: T,
}

/// `{ "data": [...], "total": n }` envelope.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    /// The payload.
    pub data: T,
    /// Number of items in `data`.
    pub total: usize,
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::InternalServerError(format!("handler panicked: {}", detail)).into_response()
}

fn build_cors(origin: &str) -> Result<CorsLayer, ServerError> {
    let origin: HeaderValue =
        origin.parse().map_err(|_| ServerError::InvalidOrigin(origin.to_string()))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Builds the application router.
///
/// Every path under `/api`, including unknown ones, sits behind the bearer
/// token check. `/health` is public.
pub fn router(state: ApiState) -> Result<Router, ServerError> {
    let cors = build_cors(&state.config.server.allowed_origin)?;

    let api = Router::new()
        .route("/alerts", get(alerts::list_alerts))
        .route("/alerts/stats/monthly", get(alerts::monthly_stats))
        .route("/alerts/{id}", get(alerts::get_alert))
        .route("/subjects", get(subjects::list_subjects))
        .fallback(api_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth::auth));

    Ok(Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Serves the API on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: ApiState, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state)?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

/// Runs the HTTP server on the configured address until Ctrl-C or SIGTERM,
/// then drains in-flight requests for at most the configured shutdown
/// timeout.
pub async fn run_server_from_config(state: ApiState) -> Result<(), ServerError> {
    let config = Arc::clone(&state.config);
    let address = &config.server.listen_address;
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| ServerError::InvalidAddress { address: address.clone(), source: e })?;

    let listener = TcpListener::bind(addr).await.map_err(ServerError::Bind)?;
    tracing::info!(address = %addr, alerts = state.store.len(), "HTTP server listening.");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(serve(listener, state, async move {
        let _ = shutdown_rx.wait_for(|stop| *stop).await;
    }));

    tokio::select! {
        result = &mut server => return result?,
        _ = shutdown_signal() => {}
    }

    tracing::info!("Shutdown signal received, draining connections...");
    shutdown_tx.send(true).ok();

    match tokio::time::timeout(config.server.shutdown_timeout, &mut server).await {
        Ok(result) => result?,
        Err(_) => {
            tracing::warn!(
                timeout = ?config.server.shutdown_timeout,
                "Connections still open after shutdown timeout, aborting."
            );
            server.abort();
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C.");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM.");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
