//! Diagnostic sink injected into an availability calendar.
//!
//! The calendar never logs through a process-wide logger on its own; it
//! reports what happened to whatever sink it was built with.

use chrono::NaiveDate;

use crate::date::MonthCursor;
use crate::error::SelectionError;
use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A day number that the displayed month does not have.
    DayOutOfMonth { month: MonthCursor, day: u32 },
    /// A click on a day before the minimum date.
    DisabledClick { date: NaiveDate },
    Rejected { date: NaiveDate, error: SelectionError },
    SelectionChanged(Selection),
    MonthChanged(MonthCursor),
    /// A refreshed occupied set now overlaps the current stay.
    SelectionConflict { first_occupied: NaiveDate },
}

pub trait DiagnosticSink {
    fn record(&self, diagnostic: &Diagnostic);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _diagnostic: &Diagnostic) {}
}

/// Forwards diagnostics as `tracing` events under the `roomcal` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::DayOutOfMonth { month, day } => {
                tracing::warn!(target: "roomcal", %month, day, "day is not in the displayed month");
            }
            Diagnostic::DisabledClick { date } => {
                tracing::debug!(target: "roomcal", %date, "ignored click on disabled day");
            }
            Diagnostic::Rejected { date, error } => {
                tracing::info!(target: "roomcal", %date, %error, "selection rejected");
            }
            Diagnostic::SelectionChanged(selection) => {
                tracing::debug!(
                    target: "roomcal",
                    check_in = %selection.check_in_str(),
                    check_out = %selection.check_out_str(),
                    "selection changed"
                );
            }
            Diagnostic::MonthChanged(month) => {
                tracing::trace!(target: "roomcal", %month, "displayed month changed");
            }
            Diagnostic::SelectionConflict { first_occupied } => {
                tracing::warn!(
                    target: "roomcal",
                    %first_occupied,
                    "current selection overlaps refreshed occupied dates"
                );
            }
        }
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn record(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}
