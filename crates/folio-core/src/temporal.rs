//! # Content Dates: Coerced From Front Matter
//!
//! Front matter rarely carries typed dates: YAML gives us `2024-01-15` as a
//! string, JSON data files may hold epoch milliseconds. `ContentDate`
//! accepts any raw value that denotes an instant and represents it as a
//! `DateTime<Utc>`.
//!
//! ## Coercion Rules
//!
//! Strings (surrounding whitespace ignored), tried in order:
//!
//! 1. RFC 3339 date-time with any offset, converted to UTC.
//! 2. RFC 2822 date-time (`Mon, 15 Jan 2024 10:00:00 +0000`).
//! 3. ISO date-time with a zone designator but no seconds, or with a
//!    compact offset (`2024-01-15T10:30Z`, `2024-01-15T10:30+02:00`,
//!    `2024-01-15T10:30:00+0200`), converted to UTC.
//! 4. Naive date-time (`2024-01-15T10:30`, `2024-01-15 10:30:00.250`),
//!    read as UTC.
//! 5. Date only (`2024-01-15`, `2024/01/15`, `January 15, 2024`,
//!    `Jan 15, 2024`), read as UTC midnight.
//! 6. Year-month (`2024-01`) or year (`2024`), read as UTC midnight of the
//!    first day.
//!
//! Numbers are milliseconds since the Unix epoch. The fractional part is
//! truncated toward zero. The usable range is what chrono can represent
//! (years -262143 to 262142, roughly -8.3e15 to 8.2e15 ms); anything
//! outside it, and any non-finite number, is unparseable.
//!
//! No other zone handling is applied: an offset in the input fixes the
//! instant, and the absence of one means UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::error::{ExpectedType, ValueKind, ViolationReason};

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Reasons a raw value could not be coerced into a [`ContentDate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateCoercionError {
    /// A string or number that does not denote a date.
    #[error("invalid date: {input}")]
    Unparseable {
        /// The raw input rendered as JSON text.
        input: String,
    },

    /// A value of a type that cannot hold a date at all.
    #[error("expected date, received {found}")]
    WrongType { found: ValueKind },
}

impl From<DateCoercionError> for ViolationReason {
    fn from(err: DateCoercionError) -> Self {
        match err {
            DateCoercionError::Unparseable { input } => ViolationReason::InvalidDate { input },
            DateCoercionError::WrongType { found } => ViolationReason::WrongType {
                expected: ExpectedType::Date,
                found,
            },
        }
    }
}

/// A date value coerced from front matter, held as a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentDate(DateTime<Utc>);

impl ContentDate {
    /// Wrap an existing UTC instant.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Midnight UTC of the given calendar day, if the day exists.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(midnight)
    }

    /// Coerce a raw front-matter value.
    ///
    /// # Errors
    ///
    /// `Unparseable` for strings and numbers that do not denote a date,
    /// `WrongType` for null, booleans, arrays and objects.
    pub fn coerce(value: &Value) -> Result<Self, DateCoercionError> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => match n.as_i64() {
                Some(ms) => Self::from_epoch_millis(ms).ok_or_else(|| unparseable(value)),
                None => n
                    .as_f64()
                    .and_then(Self::from_epoch_millis_f64)
                    .ok_or_else(|| unparseable(value)),
            },
            other => Err(DateCoercionError::WrongType {
                found: ValueKind::of(other),
            }),
        }
    }

    /// Parse a date from text using the rules in the module docs.
    pub fn parse(input: &str) -> Result<Self, DateCoercionError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(unparseable(&Value::String(input.to_string())));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        let zoned = zulu_as_offset(s);
        for fmt in OFFSET_DATETIME_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
                return Ok(Self(dt.with_timezone(&Utc)));
            }
        }
        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self(naive.and_utc()));
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Ok(midnight(date));
            }
        }
        if let Some(date) = parse_year_month(s) {
            return Ok(midnight(date));
        }

        Err(unparseable(&Value::String(input.to_string())))
    }

    /// From integral milliseconds since the Unix epoch.
    pub fn from_epoch_millis(ms: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(ms).map(Self)
    }

    fn from_epoch_millis_f64(ms: f64) -> Option<Self> {
        // The i64 cast saturates, and saturated values are outside chrono's range.
        if !ms.is_finite() {
            return None;
        }
        Self::from_epoch_millis(ms.trunc() as i64)
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO 8601 UTC with millisecond precision
    /// (`2024-01-15T00:00:00.000Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl std::fmt::Display for ContentDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for ContentDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for ContentDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::coerce(&raw).map_err(serde::de::Error::custom)
    }
}

fn midnight(date: NaiveDate) -> ContentDate {
    ContentDate(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// `2024-01-15T10:30Z` -> `2024-01-15T10:30+00:00`.
fn zulu_as_offset(s: &str) -> String {
    match s.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => s.to_string(),
    }
}

/// `YYYY-MM` or `YYYY`, as the first day of that month or year.
fn parse_year_month(s: &str) -> Option<NaiveDate> {
    let all_digits = |part: &str, len: usize| {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    };
    let (year, month) = match s.split_once('-') {
        Some((year, month)) if all_digits(month, 2) => (year, month.parse().ok()?),
        Some(_) => return None,
        None => (s, 1),
    };
    if !all_digits(year, 4) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

fn unparseable(value: &Value) -> DateCoercionError {
    DateCoercionError::Unparseable {
        input: value.to_string(),
    }
}
