//! This module provides the `AlertLoader` for reading the alert dataset from
//! disk.

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::models::Alert;

/// Errors that can occur while loading the alert dataset.
#[derive(Debug, Error)]
pub enum AlertLoaderError {
    /// An I/O error occurred while reading the dataset file.
    #[error("Failed to read alert dataset '{path}': {source}")]
    IoError {
        /// The path to the dataset file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The dataset is not valid JSON or a record is malformed.
    #[error("Failed to parse alert dataset '{path}': {source}")]
    ParseError {
        /// The path to the dataset file.
        path: PathBuf,
        /// The underlying JSON parsing error.
        #[source]
        source: serde_json::Error,
    },
    /// The dataset file does not have a `.json` extension.
    #[error("Unsupported alert dataset format: '{0}'")]
    UnsupportedFormat(PathBuf),
}

/// A loader for the static alert dataset, a JSON array of alert records.
pub struct AlertLoader {
    path: PathBuf,
}

impl AlertLoader {
    /// Creates a new `AlertLoader` instance.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads and parses every record in the dataset.
    pub fn load(&self) -> Result<Vec<Alert>, AlertLoaderError> {
        if !self.is_json_file() {
            return Err(AlertLoaderError::UnsupportedFormat(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| AlertLoaderError::IoError { path: self.path.clone(), source: e })?;

        let alerts = serde_json::from_str(&content)
            .map_err(|e| AlertLoaderError::ParseError { path: self.path.clone(), source: e })?;

        Ok(alerts)
    }

    fn is_json_file(&self) -> bool {
        matches!(self.path.extension().and_then(|ext| ext.to_str()), Some("json"))
    }
}
