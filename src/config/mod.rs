//! Configuration module for the alert dashboard API.

mod app_config;
mod auth;
mod helpers;
mod server;

pub use app_config::{AppConfig, AppConfigBuilder};
pub use auth::AuthConfig;
pub use helpers::{
    deserialize_duration_from_ms, deserialize_duration_from_seconds, serialize_duration_to_ms,
    serialize_duration_to_seconds,
};
pub use server::ServerConfig;
