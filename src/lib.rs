#![warn(missing_docs)]
//! A read-only alert monitoring API: a fixed alert dataset served through
//! filterable, bearer-token protected endpoints.

pub mod auth;
pub mod cmd;
pub mod config;
pub mod http_server;
pub mod models;
pub mod query;
pub mod store;
pub mod test_helpers;
