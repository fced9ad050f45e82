//! # Temporal Types — Record Stamps and Day Counts
//!
//! `Timestamp` stamps the `lastUpdated` field of persisted progress records.
//! It is UTC-only with whole-second precision. Records written by a browser
//! carry milliseconds (`2026-11-20T14:03:11.482Z`); those parse and are cut
//! back to the second, so a stamp always re-serializes in the short form.
//!
//! Fixture dates (deadlines, trial date, engagement start) are plain calendar
//! dates and use `chrono::NaiveDate` directly; [`days_between`] is the single
//! place where day counts are computed.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DocketError;

/// When a progress record was last written. Serializes as
/// `YYYY-MM-DDTHH:MM:SSZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Stamp for a given instant, dropping sub-second digits.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant.trunc_subsecs(0))
    }

    /// Parse an RFC 3339 stamp in UTC (`Z` suffix). Fractional seconds are
    /// accepted and dropped.
    pub fn parse(s: &str) -> Result<Self, DocketError> {
        let s = s.trim();
        if !s.ends_with('Z') {
            return Err(DocketError::SchemaValidation(format!(
                "lastUpdated must be UTC with a Z suffix, got {s:?}"
            )));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self::at(dt.with_timezone(&Utc)))
            .map_err(|e| DocketError::SchemaValidation(format!("bad lastUpdated {s:?}: {e}")))
    }

    /// UTC calendar day of the stamp.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Whole days from `from` to `to`. Negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
