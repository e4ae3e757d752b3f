//! Per-month alert aggregation returned by the stats endpoint.

use serde::{Deserialize, Serialize};

/// Number of alerts and their ids for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStat {
    /// Bucket key in `YYYY-MM` form.
    pub month: String,

    /// Number of alerts in the bucket.
    pub count: usize,

    /// Ids of the alerts in the bucket, in encounter order.
    #[serde(rename = "alertIds")]
    pub alert_ids: Vec<String>,
}

impl MonthlyStat {
    /// Creates an empty bucket for `month`.
    pub fn new(month: impl Into<String>) -> Self {
        Self { month: month.into(), count: 0, alert_ids: Vec::new() }
    }

    /// Records one alert in the bucket.
    pub fn push(&mut self, alert_id: &str) {
        self.count += 1;
        self.alert_ids.push(alert_id.to_string());
    }
}
