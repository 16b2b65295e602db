//! The set of dates with no bookable room left.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::date::{format_date, parse_date};
use crate::error::RoomcalResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupiedDates {
    dates: BTreeSet<NaiveDate>,
}

impl OccupiedDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the set from `YYYY-MM-DD` strings.
    ///
    /// The first malformed string fails the whole parse; no partially
    /// built set is returned.
    pub fn parse<I, S>(dates: I) -> RoomcalResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dates = dates
            .into_iter()
            .map(|s| parse_date(s.as_ref()))
            .collect::<RoomcalResult<BTreeSet<_>>>()?;
        Ok(OccupiedDates { dates })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// First occupied date in the half-open range `[from, to)`.
    pub fn first_in(&self, from: NaiveDate, to: NaiveDate) -> Option<NaiveDate> {
        if to <= from {
            return None;
        }
        self.dates.range(from..to).next().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(format_date).collect()
    }
}

impl FromIterator<NaiveDate> for OccupiedDates {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        OccupiedDates {
            dates: iter.into_iter().collect(),
        }
    }
}
