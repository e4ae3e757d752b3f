//! Pure query operations over the alert collection.
//!
//! Every function here takes borrowed alerts and returns a freshly derived
//! view. Nothing is cached and the input is never modified, so calling an
//! operation twice with the same input always yields the same output.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Alert, MonthlyStat};

/// A calendar month filter.
///
/// A component that was supplied but does not start with an integer is kept
/// as `None`, and such a period matches no alert at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPeriod {
    month: Option<u32>,
    year: Option<i32>,
}

impl MonthPeriod {
    /// A period for the 1-indexed `month` of `year`.
    pub fn new(month: u32, year: i32) -> Self {
        Self { month: Some(month), year: Some(year) }
    }

    /// Builds a period from raw query parameters.
    ///
    /// Both parameters must be present and non-empty; if either one is
    /// missing the result is `None`, meaning no month filtering at all. Each
    /// value is read up to its first non-digit, so `3.0` and `3abc` are both
    /// month 3.
    pub fn from_query(month: Option<&str>, year: Option<&str>) -> Option<Self> {
        let month = month.filter(|m| !m.is_empty())?;
        let year = year.filter(|y| !y.is_empty())?;

        Some(Self {
            month: leading_integer(month).and_then(|m| u32::try_from(m).ok()),
            year: leading_integer(year).and_then(|y| i32::try_from(y).ok()),
        })
    }

    /// Whether `alert` was raised during this period.
    pub fn contains(&self, alert: &Alert) -> bool {
        match (self.month, self.year) {
            (Some(month), Some(year)) =>
                alert.timestamp.month() == month && alert.timestamp.year() == year,
            _ => false,
        }
    }
}

/// The integer at the start of `raw`, after leading whitespace and an
/// optional sign. Anything after the digits is ignored.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let value: i64 = rest[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}

/// Alerts whose subject equals `subject`, in input order.
pub fn filter_by_subject<'a, I>(alerts: I, subject: &str) -> Vec<&'a Alert>
where
    I: IntoIterator<Item = &'a Alert>,
{
    alerts.into_iter().filter(|alert| alert.subject == subject).collect()
}

/// Alerts raised during `period`, in input order.
pub fn filter_by_month<'a, I>(alerts: I, period: &MonthPeriod) -> Vec<&'a Alert>
where
    I: IntoIterator<Item = &'a Alert>,
{
    alerts.into_iter().filter(|alert| period.contains(alert)).collect()
}

/// Buckets alerts by `YYYY-MM` and returns the buckets in ascending month
/// order. Ids inside a bucket keep their encounter order.
pub fn group_by_month<'a, I>(alerts: I) -> Vec<MonthlyStat>
where
    I: IntoIterator<Item = &'a Alert>,
{
    let mut buckets: BTreeMap<String, MonthlyStat> = BTreeMap::new();

    for alert in alerts {
        let key = alert.timestamp.month_key();
        buckets.entry(key).or_insert_with_key(|key| MonthlyStat::new(key.as_str())).push(&alert.id);
    }

    buckets.into_values().collect()
}

/// The distinct subjects present, sorted ascending.
pub fn distinct_subjects<'a, I>(alerts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Alert>,
{
    alerts
        .into_iter()
        .map(|alert| alert.subject.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Combined filter used by the alert listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    /// Keep only this subject. An empty string counts as no filter.
    pub subject: Option<String>,
    /// Keep only this month.
    pub period: Option<MonthPeriod>,
}

impl AlertFilter {
    /// The subject to filter on, if any.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref().filter(|s| !s.is_empty())
    }

    /// Applies the subject filter, then the month filter.
    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        let mut selected: Vec<&Alert> = match self.subject() {
            Some(subject) => filter_by_subject(alerts, subject),
            None => alerts.iter().collect(),
        };

        if let Some(period) = &self.period {
            selected = filter_by_month(selected, period);
        }

        selected
    }
}
