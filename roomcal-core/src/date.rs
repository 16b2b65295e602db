//! Calendar dates and months at the string boundary.
//!
//! Dates are plain local-calendar values (`NaiveDate`); nothing here knows
//! about time zones or instants. Strings only appear when parsing caller
//! input or formatting output.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{RoomcalError, RoomcalResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// True when `s` is ASCII digits with `-` exactly at `dashes` and nowhere else.
fn has_shape(s: &str, len: usize, dashes: &[usize]) -> bool {
    s.len() == len
        && s.bytes().enumerate().all(|(i, b)| {
            if dashes.contains(&i) { b == b'-' } else { b.is_ascii_digit() }
        })
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> RoomcalResult<NaiveDate> {
    if !has_shape(s, 10, &[4, 7]) {
        return Err(RoomcalError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| RoomcalError::InvalidDate(s.to_string()))
}

/// Parse a `YYYY-MM-DD` string where the empty string means "unset".
pub fn parse_optional_date(s: &str) -> RoomcalResult<Option<NaiveDate>> {
    if s.is_empty() {
        Ok(None)
    } else {
        parse_date(s).map(Some)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format an optional date, using the empty string for "unset".
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

/// The month currently shown by a calendar grid.
///
/// Always holds the first day of the month, so every cursor value is a
/// real calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> RoomcalResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| MonthCursor { first })
            .ok_or_else(|| RoomcalError::InvalidMonth(format!("{year:04}-{month:02}")))
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        MonthCursor {
            first: date - chrono::Duration::days(i64::from(date.day0())),
        }
    }

    /// Parse a `YYYY-MM` string.
    pub fn parse(s: &str) -> RoomcalResult<Self> {
        if !has_shape(s, 7, &[4]) {
            return Err(RoomcalError::InvalidMonth(s.to_string()));
        }
        NaiveDate::parse_from_str(&format!("{s}-01"), DATE_FORMAT)
            .map(|first| MonthCursor { first })
            .map_err(|_| RoomcalError::InvalidMonth(s.to_string()))
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    /// The following month. Saturates at the last representable month.
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| MonthCursor { first })
            .unwrap_or(self)
    }

    /// The preceding month. Saturates at the first representable month.
    pub fn prev(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| MonthCursor { first })
            .unwrap_or(self)
    }

    pub fn days_in_month(self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            None => 31,
        }
    }

    /// The date for day-of-month `day`, if the month has that day.
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// Blank cells before the 1st in a Sunday-first week.
    pub fn leading_blanks(self) -> usize {
        self.first.weekday().num_days_from_sunday() as usize
    }

    /// Human-readable title, e.g. "June 2024".
    pub fn title(self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
