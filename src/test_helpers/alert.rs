//! A builder for creating `Alert` instances in tests, plus a shared fixture set.

use std::collections::BTreeMap;

use crate::{
    models::{Alert, AlertMetadata, MetadataValue, Severity, Timestamp},
    store::AlertStore,
};

/// A builder for creating `Alert` instances in tests.
pub struct AlertBuilder {
    id: String,
    subject: String,
    timestamp: String,
    severity: Severity,
    title: String,
    message: String,
    device_id: String,
    location: String,
    extra: BTreeMap<String, MetadataValue>,
}

impl AlertBuilder {
    /// Creates a new `AlertBuilder` for an alert with the given id.
    pub fn new(id: &str) -> Self {
        AlertBuilder {
            id: id.to_string(),
            subject: "network".to_string(),
            timestamp: "2024-03-15T10:00:00Z".to_string(),
            severity: Severity::Medium,
            title: "Test alert".to_string(),
            message: "Test alert message".to_string(),
            device_id: "device-1".to_string(),
            location: "Test Lab".to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Sets the subject.
    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = subject.to_string();
        self
    }

    /// Sets the timestamp. Must be a valid ISO-8601 datetime.
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    /// Sets the severity.
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the device id and location.
    pub fn device(mut self, device_id: &str, location: &str) -> Self {
        self.device_id = device_id.to_string();
        self.location = location.to_string();
        self
    }

    /// Adds an extra metadata entry.
    pub fn metadata(mut self, key: &str, value: MetadataValue) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// Builds the `Alert`.
    pub fn build(self) -> Alert {
        Alert {
            id: self.id,
            subject: self.subject,
            timestamp: Timestamp::parse(&self.timestamp).expect("Invalid test timestamp"),
            severity: self.severity,
            title: self.title,
            message: self.message,
            metadata: AlertMetadata {
                device_id: self.device_id,
                location: self.location,
                extra: self.extra,
            },
        }
    }
}

/// Eight alerts over three subjects, spanning December 2023 to April 2024.
///
/// | id    | subject  | month   |
/// |-------|----------|---------|
/// | a-001 | network  | 2023-12 |
/// | a-002 | database | 2024-01 |
/// | a-003 | network  | 2024-03 |
/// | a-004 | storage  | 2024-03 |
/// | a-005 | network  | 2024-03 |
/// | a-006 | database | 2024-03 |
/// | a-007 | network  | 2024-04 |
/// | a-008 | storage  | 2024-04 |
pub fn sample_alerts() -> Vec<Alert> {
    vec![
        AlertBuilder::new("a-001")
            .subject("network")
            .timestamp("2023-12-28T23:15:00Z")
            .severity(Severity::High)
            .title("Core switch unreachable")
            .device("sw-core-01", "Paris DC1")
            .build(),
        AlertBuilder::new("a-002")
            .subject("database")
            .timestamp("2024-01-10T08:00:00Z")
            .severity(Severity::Critical)
            .title("Primary database down")
            .device("db-01", "Paris DC1")
            .build(),
        AlertBuilder::new("a-003")
            .subject("network")
            .timestamp("2024-03-02T09:30:00Z")
            .title("Packet loss on uplink")
            .device("rt-edge-02", "Lyon")
            .metadata("lossPercent", MetadataValue::Number(serde_json::Number::from(7)))
            .build(),
        AlertBuilder::new("a-004")
            .subject("storage")
            .timestamp("2024-03-05T14:45:00Z")
            .severity(Severity::Low)
            .title("Volume 80% full")
            .device("nas-03", "Lyon")
            .build(),
        AlertBuilder::new("a-005")
            .subject("network")
            .timestamp("2024-03-18T21:05:00Z")
            .severity(Severity::High)
            .title("BGP session flapping")
            .device("rt-edge-01", "Paris DC1")
            .build(),
        AlertBuilder::new("a-006")
            .subject("database")
            .timestamp("2024-03-30T11:11:00Z")
            .title("Slow queries detected")
            .device("db-02", "Marseille")
            .build(),
        AlertBuilder::new("a-007")
            .subject("network")
            .timestamp("2024-04-02T06:00:00Z")
            .severity(Severity::Low)
            .title("Interface errors rising")
            .device("sw-access-14", "Lyon")
            .build(),
        AlertBuilder::new("a-008")
            .subject("storage")
            .timestamp("2024-04-22T17:20:00Z")
            .severity(Severity::Critical)
            .title("RAID array degraded")
            .device("nas-01", "Paris DC1")
            .metadata("failedDisks", MetadataValue::List(vec![MetadataValue::Text("sdb".to_string())]))
            .build(),
    ]
}

/// An `AlertStore` holding `sample_alerts()`.
pub fn sample_store() -> AlertStore {
    AlertStore::new(sample_alerts()).expect("Sample alerts have unique ids")
}
