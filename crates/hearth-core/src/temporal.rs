//! # Temporal Types — UTC-Only Timestamps
//!
//! `Timestamp` is a UTC timestamp truncated to seconds precision. Escrow
//! deadlines are second-granular (`created_at + timeout_secs`), so
//! sub-second components would only add noise to elapsed-time arithmetic
//! and make eligibility boundaries ambiguous.
//!
//! Non-UTC offsets are rejected by the strict parser; a lenient parser is
//! provided for ingesting external data, converting to UTC.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HearthError;

/// A UTC timestamp with seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// From a Unix epoch timestamp in seconds.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, HearthError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| HearthError::InvalidTimestamp(format!("epoch out of range: {secs}")))
    }

    /// Parse an RFC 3339 string, rejecting non-`Z` timezone suffixes.
    pub fn parse(s: &str) -> Result<Self, HearthError> {
        if !s.ends_with('Z') {
            return Err(HearthError::InvalidTimestamp(format!(
                "timestamp must use Z suffix (UTC only), got {s:?}"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| HearthError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Parse an RFC 3339 string with any offset, converting to UTC.
    pub fn parse_lenient(s: &str) -> Result<Self, HearthError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| HearthError::InvalidTimestamp(format!("{s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// The Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Whole seconds elapsed from `earlier` to `self`, saturating at zero
    /// when `self` precedes `earlier`.
    pub fn saturating_secs_since(&self, earlier: Timestamp) -> u64 {
        (self.epoch_secs() - earlier.epoch_secs()).max(0) as u64
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO 8601 with `Z` suffix, e.g. `2026-08-27T12:00:00Z`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision.
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_parse_z_suffix_accepted() {
        let ts = Timestamp::parse("2026-08-27T12:00:00Z").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-08-27T12:00:00Z");
    }

    #[test]
    fn test_parse_offset_rejected() {
        assert!(Timestamp::parse("2026-08-27T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-08-27T17:00:00+05:00").is_err());
    }

    #[test]
    fn test_parse_lenient_converts_offset() {
        let ts = Timestamp::parse_lenient("2026-08-27T17:00:00+05:00").unwrap();
        assert_eq!(ts.to_iso8601(), "2026-08-27T12:00:00Z");
    }

    #[test]
    fn test_parse_subseconds_truncated() {
        let ts = Timestamp::parse("2026-08-27T12:00:00.750Z").unwrap();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_epoch_roundtrip() {
        let ts = Timestamp::parse("2026-08-27T12:00:00Z").unwrap();
        assert_eq!(
            Timestamp::from_epoch_secs(ts.epoch_secs()).unwrap(),
            ts
        );
    }

    #[test]
    fn test_saturating_secs_since() {
        let earlier = Timestamp::parse("2026-08-27T12:00:00Z").unwrap();
        let later = Timestamp::parse("2026-08-27T12:01:00Z").unwrap();
        assert_eq!(later.saturating_secs_since(earlier), 60);
        assert_eq!(earlier.saturating_secs_since(later), 0);
        assert_eq!(earlier.saturating_secs_since(earlier), 0);
    }

    #[test]
    fn test_ordering() {
        let a = Timestamp::parse("2026-08-27T12:00:00Z").unwrap();
        let b = Timestamp::parse("2026-08-27T12:00:01Z").unwrap();
        assert!(a < b);
    }
}
