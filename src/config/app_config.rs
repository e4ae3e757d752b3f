use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{AuthConfig, ServerConfig};

/// Provides the default location of the alert dataset.
fn default_alerts_path() -> PathBuf {
    PathBuf::from("data/alerts.json")
}

/// Application configuration for the alert dashboard API.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Path to the JSON alert dataset loaded at startup.
    #[serde(default = "default_alerts_path")]
    pub alerts_path: PathBuf,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Token validation settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alerts_path: default_alerts_path(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` from `<config_dir>/app.yaml`, if present,
    /// overridden by `ALERTDASH__*` environment variables.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)).required(false))
            .add_source(Environment::with_prefix("ALERTDASH").separator("__"))
            .build()?;
        s.try_deserialize()
    }

    /// Creates a new `AppConfigBuilder` for testing purposes.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// A builder for creating `AppConfig` instances in tests.
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Sets the dataset path.
    pub fn alerts_path(mut self, path: &str) -> Self {
        self.config.alerts_path = path.into();
        self
    }

    /// Sets the listen address.
    pub fn listen_address(mut self, address: &str) -> Self {
        self.config.server.listen_address = address.to_string();
        self
    }

    /// Sets the allowed CORS origin.
    pub fn allowed_origin(mut self, origin: &str) -> Self {
        self.config.server.allowed_origin = origin.to_string();
        self
    }

    /// Sets the token issuer.
    pub fn issuer_base_url(mut self, issuer: &str) -> Self {
        self.config.auth.issuer_base_url = issuer.to_string();
        self
    }

    /// Sets the expected token audience.
    pub fn audience(mut self, audience: &str) -> Self {
        self.config.auth.audience = audience.to_string();
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> AppConfig {
        self.config
    }
}
