//! `check` subcommand: validates the alert dataset and prints a summary.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::AppConfig,
    models::MonthlyStat,
    query::{distinct_subjects, filter_by_subject, group_by_month},
    store::{AlertStore, StoreError},
};

/// Errors that can occur while checking a dataset.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    /// The dataset failed to load.
    #[error("Dataset error: {0}")]
    Store(#[from] StoreError),
    /// The report could not be rendered.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Arguments for the `check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Dataset to check. Defaults to `alerts_path` from the configuration.
    #[arg(short, long)]
    alerts: Option<PathBuf>,
    /// Restrict the monthly breakdown to one subject.
    #[arg(short, long)]
    subject: Option<String>,
}

/// Summary of a dataset.
#[derive(Debug, Serialize)]
pub struct DatasetReport {
    /// Path of the dataset.
    pub path: PathBuf,
    /// Number of alerts loaded.
    pub total: usize,
    /// Distinct subjects, sorted.
    pub subjects: Vec<String>,
    /// Alerts per month, for the selected subject if any.
    pub monthly: Vec<MonthlyStat>,
}

/// Loads the dataset at `path` and summarizes it.
pub fn build_report(path: PathBuf, subject: Option<&str>) -> Result<DatasetReport, StoreError> {
    let store = AlertStore::load(&path)?;

    let monthly = match subject {
        Some(subject) => group_by_month(filter_by_subject(store.all(), subject)),
        None => group_by_month(store.all()),
    };

    Ok(DatasetReport {
        path,
        total: store.len(),
        subjects: distinct_subjects(store.all()),
        monthly,
    })
}

/// Runs the `check` subcommand.
pub fn execute(args: CheckArgs, config_dir: Option<&str>) -> Result<(), Error> {
    let path = match args.alerts {
        Some(path) => path,
        None => AppConfig::new(config_dir)?.alerts_path,
    };

    let report = build_report(path, args.subject.as_deref())?;
    tracing::info!(total = report.total, subjects = report.subjects.len(), "Dataset is valid.");

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
