//! The `Alert` record served by the API, along with its severity, timestamp
//! and metadata types.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Severity level of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational, no action required.
    Low,
    /// Should be looked at.
    Medium,
    /// Needs prompt attention.
    High,
    /// Service-affecting.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

/// An ISO-8601 timestamp that keeps its original text for serialization.
///
/// Parsing happens once, when the record is deserialized, so a malformed
/// timestamp rejects the whole record instead of failing later queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    /// Parses an ISO-8601 datetime.
    ///
    /// Accepts RFC 3339 with an offset (converted to UTC), a naive
    /// `YYYY-MM-DDTHH:MM:SS[.fff]` taken as UTC, or a bare `YYYY-MM-DD`
    /// taken as midnight UTC.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let instant = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
            })
            .or_else(|_| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
            })?;

        Ok(Self { raw: raw.to_string(), instant })
    }

    /// The timestamp exactly as it appeared in the dataset.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed instant in UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Calendar year (UTC).
    pub fn year(&self) -> i32 {
        self.instant.year()
    }

    /// Calendar month, 1-indexed (UTC).
    pub fn month(&self) -> u32 {
        self.instant.month()
    }

    /// The `YYYY-MM` bucket key for this timestamp.
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}

/// A value stored under an extra metadata key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    /// A boolean flag.
    Bool(bool),
    /// An integer or floating point number.
    Number(serde_json::Number),
    /// A string.
    Text(String),
    /// An ordered list of values.
    List(Vec<MetadataValue>),
    /// A nested mapping.
    Map(BTreeMap<String, MetadataValue>),
}

/// Metadata attached to an alert. `deviceId` and `location` are mandatory;
/// any other key is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertMetadata {
    /// Identifier of the device that raised the alert.
    #[serde(rename = "deviceId")]
    pub device_id: String,

    /// Where the device is located.
    pub location: String,

    /// Any additional keys.
    #[serde(flatten)]
    pub extra: BTreeMap<String, MetadataValue>,
}

/// A single reported event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique identifier within the store.
    pub id: String,

    /// Category label used to partition alerts (device class, system name...).
    pub subject: String,

    /// When the alert was raised.
    pub timestamp: Timestamp,

    /// Severity level.
    pub severity: Severity,

    /// Short human-readable title.
    pub title: String,

    /// Full alert message.
    pub message: String,

    /// Device metadata.
    pub metadata: AlertMetadata,
}
