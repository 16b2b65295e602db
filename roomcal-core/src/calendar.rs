//! The availability calendar: a check-in / check-out picker that refuses
//! stays touching occupied or past dates.

use chrono::NaiveDate;

use crate::date::{MonthCursor, format_date, parse_optional_date};
use crate::diagnostics::{Diagnostic, DiagnosticSink, NullSink};
use crate::error::{RoomcalError, RoomcalResult, SelectionError};
use crate::grid::{Cell, DayCell, MonthGrid};
use crate::occupied::OccupiedDates;
use crate::selection::Selection;

/// Receives every change the calendar makes, as the booking form would.
///
/// Values are `YYYY-MM-DD`, or the empty string when cleared.
pub trait SelectionListener {
    fn check_in_changed(&mut self, value: &str);
    fn check_out_changed(&mut self, value: &str);
    fn rejected(&mut self, error: SelectionError);
}

/// One callback invocation, as recorded by [`EventLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarEvent {
    CheckIn(String),
    CheckOut(String),
    Error(String),
}

/// A listener that keeps every callback in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<CalendarEvent>,
}

impl EventLog {
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|event| match event {
            CalendarEvent::Error(message) => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl SelectionListener for EventLog {
    fn check_in_changed(&mut self, value: &str) {
        self.events.push(CalendarEvent::CheckIn(value.to_string()));
    }

    fn check_out_changed(&mut self, value: &str) {
        self.events.push(CalendarEvent::CheckOut(value.to_string()));
    }

    fn rejected(&mut self, error: SelectionError) {
        self.events.push(CalendarEvent::Error(error.to_string()));
    }
}

/// Caller-supplied inputs. Dates are `YYYY-MM-DD`; empty check-in /
/// check-out strings mean unset.
#[derive(Debug, Clone, Default)]
pub struct CalendarProps {
    pub check_in: String,
    pub check_out: String,
    pub occupied: Vec<String>,
    pub min_date: Option<String>,
    /// Month to display first (`YYYY-MM`). Defaults to the check-in month,
    /// then the minimum date's month, then the current month.
    pub month: Option<String>,
}

/// What a day click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    CheckInSet(NaiveDate),
    CheckOutSet(NaiveDate),
    Cleared,
    Rejected(SelectionError),
    /// Day before the minimum date; nothing happened.
    Disabled,
    /// Day number not in the displayed month; nothing happened.
    OutOfMonth,
}

pub struct AvailabilityCalendar<L> {
    occupied: OccupiedDates,
    min_date: Option<NaiveDate>,
    selection: Selection,
    cursor: MonthCursor,
    listener: L,
    sink: Box<dyn DiagnosticSink>,
}

impl<L: SelectionListener> AvailabilityCalendar<L> {
    /// Build a calendar from caller props. Any malformed date string, or a
    /// stay that already includes an occupied night, fails construction.
    pub fn new(props: CalendarProps, listener: L) -> RoomcalResult<Self> {
        let occupied = OccupiedDates::parse(&props.occupied)?;
        let min_date = match props.min_date.as_deref() {
            Some(s) => parse_optional_date(s)?,
            None => None,
        };
        let selection = Selection::parse(&props.check_in, &props.check_out)?;
        if let Some(date) = selection.first_conflict(&occupied) {
            return Err(RoomcalError::InvalidSelection(format!(
                "stay {} to {} includes unavailable date {date}",
                selection.check_in_str(),
                selection.check_out_str()
            )));
        }

        let cursor = match props.month.as_deref() {
            Some(month) => MonthCursor::parse(month)?,
            None => {
                let anchor = selection
                    .check_in
                    .or(min_date)
                    .unwrap_or_else(|| chrono::Local::now().date_naive());
                MonthCursor::of(anchor)
            }
        };

        Ok(AvailabilityCalendar {
            occupied,
            min_date,
            selection,
            cursor,
            listener,
            sink: Box::new(NullSink),
        })
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn check_in(&self) -> String {
        self.selection.check_in_str()
    }

    pub fn check_out(&self) -> String {
        self.selection.check_out_str()
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.min_date
    }

    pub fn occupied(&self) -> &OccupiedDates {
        &self.occupied
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    pub fn is_occupied(&self, date: NaiveDate) -> bool {
        self.occupied.contains(date)
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.min_date.is_some_and(|min| date < min)
    }

    pub fn is_in_range(&self, date: NaiveDate) -> bool {
        self.selection.is_between(date)
    }

    /// Replace the occupied set, e.g. after room or reservation data changed.
    ///
    /// The current selection is kept as-is; an overlap with the new set is
    /// only reported to the diagnostic sink.
    pub fn set_occupied<I, S>(&mut self, dates: I) -> RoomcalResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.occupied = OccupiedDates::parse(dates)?;

        if let Some(first_occupied) = self.selection.first_conflict(&self.occupied) {
            self.sink.record(&Diagnostic::SelectionConflict { first_occupied });
        }

        Ok(())
    }

    /// Change the minimum selectable date (`YYYY-MM-DD`, empty for none).
    pub fn set_min_date(&mut self, min_date: &str) -> RoomcalResult<()> {
        self.min_date = parse_optional_date(min_date)?;
        Ok(())
    }

    pub fn next_month(&mut self) {
        self.show_month(self.cursor.next());
    }

    pub fn prev_month(&mut self) {
        self.show_month(self.cursor.prev());
    }

    /// Jump the displayed month. Selection is untouched.
    pub fn show_month(&mut self, month: MonthCursor) {
        if month != self.cursor {
            self.cursor = month;
            self.sink.record(&Diagnostic::MonthChanged(month));
        }
    }

    /// Handle a click on day-of-month `day` in the displayed month.
    pub fn click_day(&mut self, day: u32) -> ClickOutcome {
        let Some(date) = self.cursor.day(day) else {
            self.sink.record(&Diagnostic::DayOutOfMonth {
                month: self.cursor,
                day,
            });
            return ClickOutcome::OutOfMonth;
        };

        if self.is_occupied(date) {
            return self.reject(date, SelectionError::Occupied);
        }

        if self.is_disabled(date) {
            self.sink.record(&Diagnostic::DisabledClick { date });
            return ClickOutcome::Disabled;
        }

        match self.selection.check_in {
            Some(check_in) if check_in == date => {
                self.clear();
                ClickOutcome::Cleared
            }
            None => {
                self.set(Selection {
                    check_in: Some(date),
                    check_out: None,
                });
                ClickOutcome::CheckInSet(date)
            }
            Some(check_in) => {
                if date < check_in {
                    return self.reject(date, SelectionError::DepartureBeforeArrival);
                }
                // The departure day itself may be occupied: same-day turnover.
                if self.occupied.first_in(check_in, date).is_some() {
                    return self.reject(date, SelectionError::RangeUnavailable);
                }
                self.set(Selection {
                    check_in: Some(check_in),
                    check_out: Some(date),
                });
                ClickOutcome::CheckOutSet(date)
            }
        }
    }

    /// Reset both ends of the selection.
    pub fn clear(&mut self) {
        self.set(Selection::default());
    }

    /// The displayed month with per-day state flags.
    pub fn month_grid(&self) -> MonthGrid {
        let month = self.cursor;
        let mut cells = vec![Cell::Blank; month.leading_blanks()];

        cells.extend((1..=month.days_in_month()).filter_map(|day| {
            let date = month.day(day)?;
            Some(Cell::Day(DayCell {
                day,
                date,
                occupied: self.is_occupied(date),
                disabled: self.is_disabled(date),
                is_check_in: self.selection.check_in == Some(date),
                is_check_out: self.selection.check_out == Some(date),
                in_range: self.is_in_range(date),
            }))
        }));

        MonthGrid { month, cells }
    }

    fn reject(&mut self, date: NaiveDate, error: SelectionError) -> ClickOutcome {
        self.sink.record(&Diagnostic::Rejected { date, error });
        self.listener.rejected(error);
        ClickOutcome::Rejected(error)
    }

    // Both callbacks fire on every change, mirroring a form that owns both fields.
    fn set(&mut self, selection: Selection) {
        self.selection = selection;
        self.listener
            .check_in_changed(&selection.check_in.map(format_date).unwrap_or_default());
        self.listener
            .check_out_changed(&selection.check_out.map(format_date).unwrap_or_default());
        self.sink.record(&Diagnostic::SelectionChanged(selection));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn calendar(occupied: &[&str], min: Option<&str>) -> AvailabilityCalendar<EventLog> {
        let props = CalendarProps {
            occupied: occupied.iter().map(|s| s.to_string()).collect(),
            min_date: min.map(str::to_string),
            month: Some("2024-06".to_string()),
            ..Default::default()
        };
        AvailabilityCalendar::new(props, EventLog::default()).unwrap()
    }

    #[test]
    fn first_click_sets_check_in_and_clears_check_out() {
        let mut cal = calendar(&[], None);

        assert_eq!(cal.click_day(5), ClickOutcome::CheckInSet(cal.cursor().day(5).unwrap()));
        assert_eq!(cal.check_in(), "2024-06-05");
        assert_eq!(cal.check_out(), "");
        assert_eq!(
            cal.listener().events,
            vec![
                CalendarEvent::CheckIn("2024-06-05".into()),
                CalendarEvent::CheckOut(String::new()),
            ]
        );
    }

    #[test]
    fn second_click_sets_check_out() {
        let mut cal = calendar(&[], None);
        cal.click_day(5);
        cal.click_day(9);

        assert_eq!(cal.check_in(), "2024-06-05");
        assert_eq!(cal.check_out(), "2024-06-09");
        assert_eq!(cal.listener().errors().count(), 0);
    }

    #[test]
    fn occupied_day_reports_error_and_keeps_state() {
        let mut cal = calendar(&["2024-06-10"], None);
        cal.click_day(5);
        cal.listener_mut().clear();

        assert_eq!(cal.click_day(10), ClickOutcome::Rejected(SelectionError::Occupied));
        assert_eq!(cal.check_in(), "2024-06-05");
        assert_eq!(cal.check_out(), "");
        assert_eq!(
            cal.listener().events,
            vec![CalendarEvent::Error("No rooms available on this date".into())]
        );
    }

    #[test]
    fn disabled_day_is_inert() {
        let mut cal = calendar(&[], Some("2024-06-10"));

        assert_eq!(cal.click_day(9), ClickOutcome::Disabled);
        assert!(cal.selection().is_empty());
        assert!(cal.listener().events.is_empty());

        // the minimum date itself is selectable
        assert!(matches!(cal.click_day(10), ClickOutcome::CheckInSet(_)));
    }

    #[test]
    fn occupied_wins_over_disabled() {
        let mut cal = calendar(&["2024-06-03"], Some("2024-06-10"));
        assert_eq!(cal.click_day(3), ClickOutcome::Rejected(SelectionError::Occupied));
    }

    #[test]
    fn reclicking_check_in_clears_everything() {
        let mut cal = calendar(&[], None);
        cal.click_day(5);
        cal.click_day(8);
        cal.listener_mut().clear();

        assert_eq!(cal.click_day(5), ClickOutcome::Cleared);
        assert!(cal.selection().is_empty());
        assert_eq!(
            cal.listener().events,
            vec![
                CalendarEvent::CheckIn(String::new()),
                CalendarEvent::CheckOut(String::new()),
            ]
        );
    }

    #[test]
    fn departure_before_arrival() {
        let mut cal = calendar(&[], None);
        cal.click_day(15);

        assert_eq!(
            cal.click_day(14),
            ClickOutcome::Rejected(SelectionError::DepartureBeforeArrival)
        );
        assert_eq!(cal.check_in(), "2024-06-15");
        assert_eq!(cal.check_out(), "");
        assert_eq!(
            cal.listener().errors().collect::<Vec<_>>(),
            vec!["Check-out date must be after check-in date"]
        );
    }

    #[test]
    fn range_crossing_occupied_date_is_rejected() {
        let mut cal = calendar(&["2024-06-10"], Some("2024-06-01"));
        cal.click_day(5);

        assert_eq!(cal.click_day(12), ClickOutcome::Rejected(SelectionError::RangeUnavailable));
        assert_eq!(cal.check_out(), "");
        assert_eq!(
            cal.listener().errors().collect::<Vec<_>>(),
            vec!["Selected range includes unavailable dates"]
        );
    }

    #[test]
    fn departure_day_before_occupied_date_is_allowed() {
        let mut cal = calendar(&["2024-06-10"], None);
        cal.click_day(5);

        // departing on the 10th is blocked by the click itself, not the range
        assert_eq!(cal.click_day(10), ClickOutcome::Rejected(SelectionError::Occupied));
        assert!(matches!(cal.click_day(9), ClickOutcome::CheckOutSet(_)));
    }

    #[test]
    fn changing_check_out_replaces_it() {
        let mut cal = calendar(&[], None);
        cal.click_day(5);
        cal.click_day(9);
        cal.click_day(7);

        assert_eq!(cal.check_in(), "2024-06-05");
        assert_eq!(cal.check_out(), "2024-06-07");
    }

    #[test]
    fn selection_survives_month_navigation() {
        let mut cal = calendar(&[], None);
        cal.click_day(28);
        let before = cal.selection();
        let june = cal.cursor();

        cal.next_month();
        assert_eq!(cal.cursor().to_string(), "2024-07");
        cal.click_day(3);
        assert_eq!(cal.check_out(), "2024-07-03");

        cal.prev_month();
        assert_eq!(cal.cursor(), june);
        assert_eq!(cal.selection().check_in, before.check_in);
    }

    #[test]
    fn out_of_month_day_is_ignored() {
        let mut cal = calendar(&[], None);
        assert_eq!(cal.click_day(31), ClickOutcome::OutOfMonth);
        assert_eq!(cal.click_day(0), ClickOutcome::OutOfMonth);
        assert!(cal.listener().events.is_empty());
    }

    #[test]
    fn grid_flags() {
        let mut cal = calendar(&["2024-06-20"], Some("2024-06-03"));
        cal.click_day(5);
        cal.click_day(8);
        let grid = cal.month_grid();

        assert_eq!(grid.title(), "June 2024");
        assert_eq!(grid.cells.len(), 6 + 30);
        assert!(grid.cells[..6].iter().all(|c| *c == Cell::Blank));
        assert_eq!(grid.weeks().count(), 6);

        let day = |n| *grid.day(n).unwrap();
        assert!(day(2).disabled && !day(3).disabled);
        assert!(day(20).occupied && !day(20).is_selectable());
        assert!(day(5).is_check_in && !day(5).in_range);
        assert!(day(6).in_range && day(7).in_range);
        assert!(day(8).is_check_out && !day(8).in_range);
        assert!(!day(9).in_range);
    }

    #[test]
    fn malformed_props_are_rejected() {
        let props = CalendarProps {
            occupied: vec!["2024-06-10".into(), "not a date".into()],
            ..Default::default()
        };
        assert!(AvailabilityCalendar::new(props, EventLog::default()).is_err());

        let props = CalendarProps {
            min_date: Some("06/01/2024".into()),
            ..Default::default()
        };
        assert!(AvailabilityCalendar::new(props, EventLog::default()).is_err());
    }

    #[test]
    fn initial_stay_over_occupied_night_is_rejected() {
        let props = CalendarProps {
            check_in: "2024-06-05".into(),
            check_out: "2024-06-12".into(),
            occupied: vec!["2024-06-10".into()],
            min_date: Some("2024-06-08".into()),
            ..Default::default()
        };
        assert!(matches!(
            AvailabilityCalendar::new(props, EventLog::default()),
            Err(RoomcalError::InvalidSelection(msg)) if msg.contains("2024-06-10")
        ));

        // departing on the occupied day is a turnover, not a conflict
        let props = CalendarProps {
            check_in: "2024-06-05".into(),
            check_out: "2024-06-10".into(),
            occupied: vec!["2024-06-10".into()],
            ..Default::default()
        };
        let cal = AvailabilityCalendar::new(props, EventLog::default()).unwrap();
        assert_eq!(cal.check_out(), "2024-06-10");

        let props = CalendarProps {
            check_in: "2024-06-10".into(),
            occupied: vec!["2024-06-10".into()],
            ..Default::default()
        };
        assert!(AvailabilityCalendar::new(props, EventLog::default()).is_err());
    }

    #[test]
    fn raising_min_date_disables_earlier_days() {
        let mut cal = calendar(&[], Some("2024-06-01"));
        assert!(!cal.month_grid().day(5).unwrap().disabled);

        cal.set_min_date("2024-06-10").unwrap();

        assert!(cal.month_grid().day(5).unwrap().disabled);
        assert_eq!(cal.click_day(5), ClickOutcome::Disabled);
        assert!(cal.selection().is_empty());
        assert!(matches!(cal.click_day(10), ClickOutcome::CheckInSet(_)));

        cal.set_min_date("").unwrap();
        assert_eq!(cal.min_date(), None);
        assert!(!cal.is_disabled(cal.cursor().day(1).unwrap()));
    }

    #[test]
    fn malformed_min_date_keeps_previous_minimum() {
        let mut cal = calendar(&[], Some("2024-06-10"));
        let before = cal.min_date();

        assert!(matches!(
            cal.set_min_date("2024-6-1"),
            Err(RoomcalError::InvalidDate(s)) if s == "2024-6-1"
        ));
        assert_eq!(cal.min_date(), before);
        assert_eq!(cal.click_day(9), ClickOutcome::Disabled);
    }

    #[test]
    fn initial_month_follows_check_in_then_min_date() {
        let props = CalendarProps {
            check_in: "2024-08-14".into(),
            min_date: Some("2024-06-01".into()),
            ..Default::default()
        };
        let cal = AvailabilityCalendar::new(props, EventLog::default()).unwrap();
        assert_eq!(cal.cursor().to_string(), "2024-08");

        let props = CalendarProps {
            min_date: Some("2024-06-01".into()),
            ..Default::default()
        };
        let cal = AvailabilityCalendar::new(props, EventLog::default()).unwrap();
        assert_eq!(cal.cursor().to_string(), "2024-06");
    }

    #[test]
    fn refreshed_occupied_set_reports_conflicts() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink_seen = Rc::clone(&seen);
        let mut cal = calendar(&[], None)
            .with_sink(move |d: &Diagnostic| sink_seen.borrow_mut().push(d.clone()));
        cal.click_day(5);
        cal.click_day(9);

        cal.set_occupied(["2024-06-07"]).unwrap();

        assert_eq!(cal.check_out(), "2024-06-09");
        let conflicts: Vec<String> = seen
            .borrow()
            .iter()
            .filter_map(|d| match d {
                Diagnostic::SelectionConflict { first_occupied } => {
                    Some(format_date(*first_occupied))
                }
                _ => None,
            })
            .collect();
        assert_eq!(conflicts, vec!["2024-06-07"]);
        assert!(cal.set_occupied(["2024-6-7"]).is_err());
    }
}
