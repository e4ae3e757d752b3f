//! The immutable, process-resident alert store.
//!
//! The store is loaded once at startup and shared by every request handler.
//! It never changes afterwards, so handlers read it without locking.

mod loader;

use std::{collections::HashSet, path::Path, sync::Arc};

pub use loader::{AlertLoader, AlertLoaderError};
use thiserror::Error;

use crate::models::Alert;

/// Errors that prevent the store from being built. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The dataset could not be read or parsed.
    #[error(transparent)]
    Load(#[from] AlertLoaderError),

    /// Two records share the same id.
    #[error("Duplicate alert id in dataset: {0}")]
    DuplicateId(String),
}

/// Read-only ordered collection of alerts. Cloning is cheap and shares the
/// underlying records.
#[derive(Debug, Clone, Default)]
pub struct AlertStore {
    alerts: Arc<[Alert]>,
}

impl AlertStore {
    /// Builds a store from already-parsed records, keeping their order.
    pub fn new(alerts: Vec<Alert>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(alerts.len());
        for alert in &alerts {
            if !seen.insert(alert.id.as_str()) {
                return Err(StoreError::DuplicateId(alert.id.clone()));
            }
        }

        Ok(Self { alerts: alerts.into() })
    }

    /// Loads the dataset at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading alert dataset...");

        let alerts = AlertLoader::new(path.to_path_buf()).load()?;
        let store = Self::new(alerts)?;

        tracing::info!(path = %path.display(), count = store.len(), "Alert dataset loaded.");
        Ok(store)
    }

    /// Every alert, in dataset order.
    pub fn all(&self) -> &[Alert] {
        &self.alerts
    }

    /// Looks up an alert by id.
    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|alert| alert.id == id)
    }

    /// Number of alerts in the store.
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    /// Whether the store holds no alerts.
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
