//! Query string handling for the alert endpoints.
//!
//! Extraction never rejects a request: repeated keys are kept, unknown keys
//! are ignored, and odd values simply narrow the result.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use url::form_urlencoded;

use crate::query::{AlertFilter, MonthPeriod};

/// How the `subject` parameter restricts a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectParam<'a> {
    /// Absent or empty: every subject.
    Any,
    /// Exactly this subject.
    Only(&'a str),
    /// Given more than once. A list of subjects equals no single subject, so
    /// nothing matches.
    Unmatchable,
}

/// The raw query string of a request, as decoded key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertQuery {
    pairs: Vec<(String, String)>,
}

impl AlertQuery {
    /// Decodes a raw `application/x-www-form-urlencoded` query string.
    pub fn parse(query: &str) -> Self {
        Self { pairs: form_urlencoded::parse(query.as_bytes()).into_owned().collect() }
    }

    fn values(&self, key: &str) -> Vec<&str> {
        self.pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str()).collect()
    }

    /// Every value of `key` joined with `,`, or `None` if the key is absent.
    fn joined(&self, key: &str) -> Option<String> {
        let values = self.values(key);
        (!values.is_empty()).then(|| values.join(","))
    }

    /// The `subject` restriction.
    pub fn subject(&self) -> SubjectParam<'_> {
        match self.values("subject").as_slice() {
            [] | [""] => SubjectParam::Any,
            [subject] => SubjectParam::Only(*subject),
            _ => SubjectParam::Unmatchable,
        }
    }

    /// The `month`/`year` restriction, if both are given.
    pub fn period(&self) -> Option<MonthPeriod> {
        MonthPeriod::from_query(self.joined("month").as_deref(), self.joined("year").as_deref())
    }

    /// The filter for the alert listing, or `None` when no alert can match.
    pub fn alert_filter(&self) -> Option<AlertFilter> {
        let subject = match self.subject() {
            SubjectParam::Any => None,
            SubjectParam::Only(subject) => Some(subject.to_string()),
            SubjectParam::Unmatchable => return None,
        };

        Some(AlertFilter { subject, period: self.period() })
    }
}

impl<S> FromRequestParts<S> for AlertQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::parse(parts.uri.query().unwrap_or_default()))
    }
}
