//! Check-in / check-out selection state.

use chrono::NaiveDate;

use crate::date::{format_optional_date, parse_optional_date};
use crate::error::{RoomcalError, RoomcalResult};
use crate::occupied::OccupiedDates;

/// A possibly partial stay. `check_out` is the departure day: it is not a
/// night of the stay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl Selection {
    /// Build a selection from caller values, where the empty string means
    /// "unset". A check-out without check-in, or before it, is rejected.
    pub fn parse(check_in: &str, check_out: &str) -> RoomcalResult<Self> {
        let check_in = parse_optional_date(check_in)?;
        let check_out = parse_optional_date(check_out)?;

        match (check_in, check_out) {
            (None, Some(out)) => Err(RoomcalError::InvalidSelection(format!(
                "check-out {out} without a check-in"
            ))),
            (Some(inn), Some(out)) if out < inn => Err(RoomcalError::InvalidSelection(format!(
                "check-out {out} is before check-in {inn}"
            ))),
            _ => Ok(Selection { check_in, check_out }),
        }
    }

    pub fn check_in_str(&self) -> String {
        format_optional_date(self.check_in)
    }

    pub fn check_out_str(&self) -> String {
        format_optional_date(self.check_out)
    }

    pub fn is_empty(&self) -> bool {
        self.check_in.is_none() && self.check_out.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some()
    }

    /// Number of nights, once both ends are set.
    pub fn nights(&self) -> Option<i64> {
        Some((self.check_out? - self.check_in?).num_days())
    }

    /// First occupied date the stay cannot have: any night in
    /// `[check_in, check_out)`, or the check-in day itself when the stay has
    /// no nights yet. The departure day is never a conflict.
    pub fn first_conflict(&self, occupied: &OccupiedDates) -> Option<NaiveDate> {
        let check_in = self.check_in?;
        match self.check_out {
            Some(check_out) if check_out > check_in => occupied.first_in(check_in, check_out),
            _ => occupied.contains(check_in).then_some(check_in),
        }
    }

    /// True for dates strictly between check-in and check-out.
    pub fn is_between(&self, date: NaiveDate) -> bool {
        match (self.check_in, self.check_out) {
            (Some(inn), Some(out)) => inn < date && date < out,
            _ => false,
        }
    }
}
