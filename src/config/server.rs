use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{deserialize_duration_from_seconds, serialize_duration_to_seconds};

/// Configuration for the REST API server.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address and port for the HTTP server to listen on.
    /// Defaults to all interfaces on `PORT` (4000 when unset).
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// The single browser origin allowed to call the API cross-origin.
    /// Falls back to the `FRONTEND_URL` env var.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// How long in-flight requests may take to drain on shutdown.
    #[serde(
        deserialize_with = "deserialize_duration_from_seconds",
        serialize_with = "serialize_duration_to_seconds",
        default = "default_shutdown_timeout"
    )]
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            allowed_origin: default_allowed_origin(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

/// Listens on every interface, on `PORT` if set.
fn default_listen_address() -> String {
    let port = std::env::var("PORT").unwrap_or_else(|_| "4000".to_string());
    format!("0.0.0.0:{}", port)
}

/// Loads the allowed origin from the `FRONTEND_URL` environment variable.
fn default_allowed_origin() -> String {
    std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(10)
}
