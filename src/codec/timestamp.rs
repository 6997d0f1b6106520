//! Fixed-format UTC instants: `YYYY-MM-DDTHH:mm:ss.sssZ`.
//!
//! Use with `#[serde(with = "timestamp")]`, or `timestamp::option` for
//! nullable instants.

use chrono::{DateTime, Datelike, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Length of every formatted instant
pub const DATE_TIME_LEN: usize = 24;

/// An instant that cannot be written or read in the fixed format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// Four-digit years only
    YearOutOfRange(i32),
    Malformed(String),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YearOutOfRange(year) => {
                write!(f, "year {} does not fit YYYY-MM-DDTHH:mm:ss.sssZ", year)
            }
            Self::Malformed(raw) => {
                write!(f, "{:?} is not a YYYY-MM-DDTHH:mm:ss.sssZ instant", raw)
            }
        }
    }
}

impl std::error::Error for TimestampError {}

/// Current instant, truncated to what the wire format can carry
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Format `instant`; years outside `0..=9999` would need a sign and are rejected
pub fn format(instant: &DateTime<Utc>) -> Result<String, TimestampError> {
    let year = instant.year();
    if !(0..=9999).contains(&year) {
        return Err(TimestampError::YearOutOfRange(year));
    }
    Ok(instant.format(DATE_TIME_FORMAT).to_string())
}

pub fn parse(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let malformed = || TimestampError::Malformed(value.to_string());

    // chrono treats the fraction as optional; the wire format does not
    let bytes = value.as_bytes();
    if bytes.len() != DATE_TIME_LEN || bytes[19] != b'.' || bytes[23] != b'Z' {
        return Err(malformed());
    }

    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| malformed())
}

pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = format(instant).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S>(instant: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match instant {
            Some(instant) => super::serialize(instant, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
