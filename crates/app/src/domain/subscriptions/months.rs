//! Month-granularity dates.
//!
//! Subscriptions are billed per calendar month, so every date they carry is the
//! first instant of a UTC month. [`Month`] keeps the integer year and month so
//! interval arithmetic never has to go through elapsed seconds.

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use thiserror::Error;

/// Errors produced while parsing or constructing a [`Month`].
#[derive(Debug, Error)]
pub enum MonthParseError {
    /// Input does not have the `MM-YYYY` shape.
    #[error("invalid month-year: {0}")]
    Malformed(String),

    /// Month component is outside `01..=12`.
    #[error("invalid month: {0}")]
    MonthOutOfRange(i8),

    /// The month cannot be represented as a UTC instant.
    #[error("month is outside the supported range")]
    OutOfRange(#[source] jiff::Error),
}

/// First instant of a calendar month in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    year: i16,
    month: i8,
    start: Timestamp,
}

impl Month {
    /// Build a month from its year and 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns an error when `month` is not in `1..=12` or the year cannot be
    /// represented.
    pub fn new(year: i16, month: i8) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::MonthOutOfRange(month));
        }

        let start = Date::new(year, month, 1)
            .and_then(|date| date.to_zoned(TimeZone::UTC))
            .map_err(MonthParseError::OutOfRange)?
            .timestamp();

        Ok(Self { year, month, start })
    }

    /// Month containing `timestamp`, evaluated in UTC.
    ///
    /// # Errors
    ///
    /// Returns an error when the month cannot be represented.
    pub fn from_timestamp(timestamp: Timestamp) -> Result<Self, MonthParseError> {
        let date = timestamp.to_zoned(TimeZone::UTC).date();

        Self::new(date.year(), date.month())
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i16 {
        self.year
    }

    /// Month number, `1..=12`.
    #[must_use]
    pub fn month(self) -> i8 {
        self.month
    }

    /// First instant of the month in UTC.
    #[must_use]
    pub fn first_instant(self) -> Timestamp {
        self.start
    }

    /// Number of calendar months from `self` through `end`, both inclusive.
    ///
    /// Negative when `end` precedes `self`; callers clamp as needed.
    #[must_use]
    pub fn months_through(self, end: Month) -> i64 {
        (i64::from(end.year) - i64::from(self.year)) * 12 + i64::from(end.month)
            - i64::from(self.month)
            + 1
    }
}

impl PartialOrd for Month {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Month {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month).cmp(&(other.year, other.month))
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    /// Parse the `MM-YYYY` wire format.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || MonthParseError::Malformed(value.to_owned());

        let (month, year) = value.split_once('-').ok_or_else(malformed)?;

        let well_formed = month.len() == 2
            && year.len() == 4
            && month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit());

        if !well_formed {
            return Err(malformed());
        }

        let month = month.parse::<i8>().map_err(|_source| malformed())?;
        let year = year.parse::<i16>().map_err(|_source| malformed())?;

        Self::new(year, month)
    }
}
