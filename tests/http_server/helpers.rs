use std::{net::SocketAddr, sync::Arc};

use alert_dashboard::{
    auth::TokenVerifier,
    config::AppConfig,
    http_server::{self, ApiState},
    store::AlertStore,
    test_helpers::{StaticTokenVerifier, TEST_ORIGIN, TEST_TOKEN, sample_store},
};
use reqwest::{Client, Method};
use tokio::task;

pub fn create_test_server_config() -> Arc<AppConfig> {
    Arc::new(AppConfig::builder().listen_address("127.0.0.1:0").allowed_origin(TEST_ORIGIN).build())
}

pub struct TestServer {
    pub address: SocketAddr,
    pub server_handle: task::JoinHandle<()>,
    pub client: Client,
}

impl TestServer {
    pub async fn new(store: AlertStore) -> Self {
        Self::with_verifier(store, Arc::new(StaticTokenVerifier::default())).await
    }

    pub async fn with_sample_alerts() -> Self {
        Self::new(sample_store()).await
    }

    pub async fn with_verifier(store: AlertStore, verifier: Arc<dyn TokenVerifier>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get address");

        let state = ApiState { config: create_test_server_config(), store, verifier };

        let server_handle = task::spawn(async move {
            http_server::serve(listener, state, std::future::pending())
                .await
                .expect("Server failed");
        });

        Self { address: addr, server_handle, client: Client::new() }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    /// Authenticated GET.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).bearer_auth(TEST_TOKEN).send().await.expect("Request failed")
    }

    /// GET without credentials.
    pub async fn get_anonymous(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.expect("Request failed")
    }

    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, self.url(path))
    }

    pub fn cleanup(self) {
        self.server_handle.abort();
    }
}

pub async fn json_body(resp: reqwest::Response) -> serde_json::Value {
    resp.json().await.expect("Failed to parse JSON")
}

pub fn ids(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data is not an array")
        .iter()
        .map(|alert| alert["id"].as_str().expect("alert without id").to_string())
        .collect()
}
