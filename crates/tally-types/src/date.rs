//! Calendar date keys for daily buckets.
//!
//! A [`DateKey`] is a local calendar date rendered as `YYYY-MM-DD`. It is the
//! key of the `dailyTotals` map in the persisted document, so it serializes
//! as a plain string and parses back from one.

use core::fmt;
use core::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

/// Wire format of a date key.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar date used to bucket activations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wrap a calendar date.
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year, month and day. Returns `None` for an invalid date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Return the underlying calendar date.
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// The following calendar day, or `None` past the end of the calendar.
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Short human label such as `Fri, Oct 16`.
    pub fn label(self) -> String {
        format!("{}, {} {}", self.0.format("%a"), self.0.format("%b"), self.0.day())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

/// Error returned when a string is not a `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDateKeyError(pub String);

impl fmt::Display for ParseDateKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid date key {:?}: expected YYYY-MM-DD", self.0)
    }
}

impl std::error::Error for ParseDateKeyError {}

impl FromStr for DateKey {
    type Err = ParseDateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_parse| ParseDateKeyError(s.to_owned()))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
