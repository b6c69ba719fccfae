//! Timestamps as the FHRS API writes them.
//!
//! # Design
//! The API mostly emits `YYYY-MM-DDTHH:MM:SS` with no offset, but some fields
//! (notably `meta.extractDate` on list endpoints) arrive as full RFC 3339 with
//! fractional seconds. Both are accepted on input. Output is always the
//! offset-free layout of the wall clock the value was parsed in, so
//! `22:32:34.2688747+01:00` re-encodes as `22:32:34`. Offset-free input is
//! taken as UTC.
//!
//! The offset-free layout is fixed width: every field is zero padded and
//! leap seconds are rejected on both paths.
//!
//! Empty strings, `null` and `undefined` decode to the zero instant
//! (0001-01-01T00:00:00 UTC) instead of failing.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The offset-free layout used for serialization.
pub const LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Seconds between 0001-01-01T00:00:00Z and the Unix epoch.
const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

/// A point in time decoded from an API timestamp string, together with the
/// offset it was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

/// Why one layout rejected a timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected zero-padded YYYY-MM-DDTHH:MM:SS")]
    NotPadded,
    #[error("second out of range")]
    LeapSecond,
    #[error(transparent)]
    Chrono(#[from] chrono::ParseError),
}

/// A timestamp string matched neither accepted layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse `{input}` as a timestamp: {layout_error} (offset-free layout), {rfc3339_error} (RFC 3339)")]
pub struct TemporalParseError {
    pub input: String,
    pub layout_error: FormatError,
    pub rfc3339_error: FormatError,
}

/// `YYYY-MM-DDTHH:MM:SS` with every field at its fixed position.
fn is_padded_layout(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b'T',
            13 | 16 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

// chrono stores a leap second as second 59 with nanoseconds past one billion.
fn is_leap_second<T: Timelike>(t: &T) -> bool {
    t.nanosecond() >= 1_000_000_000
}

fn parse_layout(s: &str) -> Result<DateTime<FixedOffset>, FormatError> {
    if !is_padded_layout(s) {
        return Err(FormatError::NotPadded);
    }
    let naive = NaiveDateTime::parse_from_str(s, LAYOUT)?;
    if is_leap_second(&naive) {
        return Err(FormatError::LeapSecond);
    }
    Ok(Utc.from_utc_datetime(&naive).fixed_offset())
}

fn parse_rfc3339(s: &str) -> Result<DateTime<FixedOffset>, FormatError> {
    let dt = DateTime::parse_from_rfc3339(s)?;
    if is_leap_second(&dt) {
        return Err(FormatError::LeapSecond);
    }
    Ok(dt)
}

impl Timestamp {
    /// The zero instant, 0001-01-01T00:00:00 UTC.
    pub fn zero() -> Self {
        let utc = DateTime::<Utc>::from_timestamp(ZERO_UNIX_SECONDS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self(utc.fixed_offset())
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Parse a raw API timestamp. Surrounding `"` characters are ignored so
    /// the quoted JSON form can be passed as-is.
    pub fn parse(raw: &str) -> Result<Self, TemporalParseError> {
        let s = raw.trim_matches('"');
        if s.is_empty() || s == "null" || s == "undefined" {
            return Ok(Self::zero());
        }

        let layout_error = match parse_layout(s) {
            Ok(dt) => return Ok(Self(dt)),
            Err(e) => e,
        };

        parse_rfc3339(s).map(Self).map_err(|rfc3339_error| TemporalParseError {
            input: raw.to_string(),
            layout_error,
            rfc3339_error,
        })
    }

    /// The instant in UTC.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// The offset the value was written in; UTC for offset-free input.
    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.fixed_offset())
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }
}

impl FromStr for Timestamp {
    type Err = TemporalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LAYOUT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a timestamp string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Timestamp::parse(v).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Timestamp::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Timestamp::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn offset_free_layout_roundtrips_exactly() {
        let ts = Timestamp::parse("2019-08-06T00:00:00").unwrap();
        assert_eq!(ts.to_string(), "2019-08-06T00:00:00");
        assert_eq!(ts.as_datetime(), Utc.with_ymd_and_hms(2019, 8, 6, 0, 0, 0).unwrap());
    }

    #[test]
    fn rfc3339_with_fraction_is_accepted() {
        let ts = Timestamp::parse("2020-02-03T22:32:34.2688747+00:00").unwrap();
        let dt = ts.as_datetime();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2020, 2, 3));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (22, 32, 34));
        assert_eq!(dt.nanosecond(), 268_874_700);
    }

    #[test]
    fn serialization_keeps_wall_clock_and_drops_offset_and_fraction() {
        let ts = Timestamp::parse("2020-02-03T22:32:34.2688747+01:00").unwrap();
        assert_eq!(ts.to_string(), "2020-02-03T22:32:34");
        assert_eq!(ts.offset(), FixedOffset::east_opt(3600).unwrap());
        assert_eq!(ts.as_datetime(), Utc.with_ymd_and_hms(2020, 2, 3, 21, 32, 34).unwrap() + chrono::Duration::nanoseconds(268_874_700));
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2020-02-03T22:32:34\"");
    }

    #[test]
    fn same_instant_in_different_offsets_compares_equal() {
        let local = Timestamp::parse("2020-02-03T22:32:34+01:00").unwrap();
        let utc = Timestamp::parse("2020-02-03T21:32:34").unwrap();
        assert_eq!(local, utc);
        assert_eq!(utc.offset(), FixedOffset::east_opt(0).unwrap());
    }

    #[test]
    fn unpadded_fields_are_rejected() {
        let err = Timestamp::parse("2019-8-6T0:0:0").unwrap_err();
        assert_eq!(err.layout_error, FormatError::NotPadded);
        assert!(matches!(err.rfc3339_error, FormatError::Chrono(_)));

        for raw in ["2019-08-06 00:00:00", "2019-08-06T00:00:00.5", "+2019-08-06T00:00"] {
            assert!(Timestamp::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn leap_seconds_are_rejected() {
        let err = Timestamp::parse("2019-08-06T00:00:60").unwrap_err();
        assert_eq!(err.layout_error, FormatError::LeapSecond);

        let err = Timestamp::parse("2016-12-31T23:59:60Z").unwrap_err();
        assert_eq!(err.rfc3339_error, FormatError::LeapSecond);
    }

    #[test]
    fn zulu_suffix_is_accepted() {
        let ts = Timestamp::parse("2021-05-01T10:00:00Z").unwrap();
        assert_eq!(ts.to_string(), "2021-05-01T10:00:00");
    }

    #[test]
    fn placeholder_tokens_yield_zero_instant() {
        for raw in ["", "null", "undefined", "\"\"", "\"null\""] {
            let ts = Timestamp::parse(raw).unwrap();
            assert!(ts.is_zero(), "{raw:?} should be zero");
        }
        assert_eq!(Timestamp::zero().to_string(), "0001-01-01T00:00:00");
    }

    #[test]
    fn explicit_zero_date_equals_zero_instant() {
        let ts = Timestamp::parse("0001-01-01T00:00:00").unwrap();
        assert!(ts.is_zero());
    }

    #[test]
    fn quoted_input_is_unwrapped() {
        let ts = Timestamp::parse("\"2019-08-06T00:00:00\"").unwrap();
        assert_eq!(ts.to_string(), "2019-08-06T00:00:00");
    }

    #[test]
    fn garbage_reports_both_failures() {
        let err = Timestamp::parse("06/08/2019").unwrap_err();
        assert_eq!(err.input, "06/08/2019");
        assert_eq!(err.layout_error, FormatError::NotPadded);
        assert!(err.to_string().contains("06/08/2019"));
    }

    #[test]
    fn json_null_and_strings_decode() {
        let ts: Timestamp = serde_json::from_str("null").unwrap();
        assert!(ts.is_zero());
        let ts: Timestamp = serde_json::from_str("\"2019-08-06T00:00:00\"").unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2019-08-06T00:00:00\"");
    }

    #[test]
    fn json_decode_failure_is_a_serde_error() {
        let err = serde_json::from_str::<Timestamp>("\"yesterday\"").unwrap_err();
        assert!(err.is_data());
    }
}
