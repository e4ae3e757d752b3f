//! A set of helpers for testing

mod alert;
mod verifier;

pub use alert::{AlertBuilder, sample_alerts, sample_store};
pub use verifier::{StaticTokenVerifier, TEST_TOKEN};

/// Browser origin allowed by test configurations.
pub const TEST_ORIGIN: &str = "http://localhost:3000";
