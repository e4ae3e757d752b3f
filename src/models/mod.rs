//! Data models served by the alert API.

pub mod alert;
pub mod monthly_stat;

pub use alert::{Alert, AlertMetadata, MetadataValue, Severity, Timestamp};
pub use monthly_stat::MonthlyStat;
