//! Month grid: one cell per day, with leading blanks for the weekday offset.

use chrono::NaiveDate;

use crate::date::MonthCursor;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub occupied: bool,
    /// Before the minimum selectable date.
    pub disabled: bool,
    pub is_check_in: bool,
    pub is_check_out: bool,
    /// Strictly between check-in and check-out.
    pub in_range: bool,
}

impl DayCell {
    /// Whether a click on this cell can change the selection.
    pub fn is_selectable(&self) -> bool {
        !self.occupied && !self.disabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Day(DayCell),
}

impl Cell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            Cell::Day(day) => Some(day),
            Cell::Blank => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: MonthCursor,
    pub cells: Vec<Cell>,
}

impl MonthGrid {
    pub fn title(&self) -> String {
        self.month.title()
    }

    /// Rows of up to seven cells, Sunday first. The last row is not padded.
    pub fn weeks(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(7)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(Cell::as_day)
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|cell| cell.day == day)
    }
}
