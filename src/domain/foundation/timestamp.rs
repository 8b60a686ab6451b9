//! Timestamp value object for immutable points in time.
//!
//! Precision is capped at microseconds, the resolution of Postgres
//! `TIMESTAMPTZ`, so a stored session reads back unchanged.

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const SUBSEC_DIGITS: u16 = 6;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>, dropping sub-microsecond digits.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(SUBSEC_DIGITS))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding the specified number of minutes.
    ///
    /// Negative values subtract minutes.
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 + Duration::minutes(minutes))
    }

    /// Creates a new timestamp by subtracting the specified number of minutes.
    pub fn minus_minutes(&self, minutes: i64) -> Self {
        Self(self.0 - Duration::minutes(minutes))
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` when the value is outside chrono's representable range.
    pub fn from_unix_secs(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now().trunc_subsecs(SUBSEC_DIGITS);
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_now_has_microsecond_precision() {
        for _ in 0..100 {
            let ts = Timestamp::now();
            assert_eq!(ts.as_datetime().timestamp_subsec_nanos() % 1_000, 0);
        }
    }

    #[test]
    fn timestamp_from_datetime_truncates_nanoseconds() {
        let dt = DateTime::from_timestamp(1_700_000_000, 123_456_789).unwrap();

        let ts = Timestamp::from_datetime(dt);

        assert_eq!(ts.as_datetime().timestamp_subsec_nanos(), 123_456_000);
        assert_eq!(Timestamp::from(dt), ts);
    }

    #[test]
    fn timestamp_minute_arithmetic() {
        let ts = Timestamp::from_unix_secs(1_000_000).unwrap();
        assert_eq!(ts.plus_minutes(10).as_unix_secs(), 1_000_600);
        assert_eq!(ts.minus_minutes(5).as_unix_secs(), 999_700);
        assert!(ts.minus_minutes(1).is_before(&ts));
        assert!(ts.plus_minutes(1).is_after(&ts));
    }

    #[test]
    fn timestamp_duration_since_is_signed() {
        let ts = Timestamp::from_unix_secs(1_000).unwrap();
        let later = ts.plus_secs(60);
        assert_eq!(later.duration_since(&ts), Duration::seconds(60));
        assert_eq!(ts.duration_since(&later), Duration::seconds(-60));
    }

    #[test]
    fn timestamp_serializes_as_rfc3339() {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = serde_json::to_string(&Timestamp::from_datetime(dt)).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(ts.as_datetime().year(), 2024);
    }

    #[test]
    fn timestamp_displays_as_rfc3339_utc() {
        let ts = Timestamp::from_unix_secs(0).unwrap();
        assert_eq!(ts.to_string(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn timestamp_from_unix_secs_rejects_out_of_range() {
        assert!(Timestamp::from_unix_secs(i64::MAX).is_none());
    }
}
