//! `YYYY-MM` month values used by summaries and exports.

#[cfg(test)]
#[path = "month_test.rs"]
mod month_test;

use std::fmt;
use std::str::FromStr;

use time::{Month, OffsetDateTime};

use crate::net::error::ApiError;

const INVALID_MONTH: &str = "use the YYYY-MM form, e.g. 2024-03";

/// A calendar month, rendered and parsed as `YYYY-MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for years outside `1..=9999`.
    pub fn new(year: i32, month: Month) -> Result<Self, ApiError> {
        if !(1..=9999).contains(&year) {
            return Err(ApiError::validation("month", INVALID_MONTH));
        }
        Ok(Self { year, month })
    }

    /// Parse a strict `YYYY-MM` string (what `<input type="month">` yields).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for any other shape.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let invalid = || ApiError::validation("month", INVALID_MONTH);
        let raw = raw.trim();
        let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 || !(year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;
        Self::new(year, month)
    }

    /// The current month in UTC.
    pub fn current() -> Self {
        let now = OffsetDateTime::now_utc();
        Self { year: now.year(), month: now.month() }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl FromStr for YearMonth {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
