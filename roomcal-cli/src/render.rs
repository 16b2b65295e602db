//! Terminal rendering of the month grid, the current stay and click results.
//!
//! Colors mark the stay ends, the nights in between, fully booked dates and
//! days before the earliest check-in.

use owo_colors::OwoColorize;
use roomcal_core::grid::{Cell, DayCell, MonthGrid, WEEKDAY_HEADERS};
use roomcal_core::{ClickOutcome, Selection};

/// Width of one day column, including the separating space.
const CELL_WIDTH: usize = 4;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DayCell {
    fn render(&self) -> String {
        let label = format!("{:>3}", self.day);

        if self.is_check_in || self.is_check_out {
            label.black().on_green().bold().to_string()
        } else if self.occupied {
            label.red().strikethrough().to_string()
        } else if self.disabled {
            label.dimmed().to_string()
        } else if self.in_range {
            label.green().to_string()
        } else {
            label
        }
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let width = CELL_WIDTH * 7;
        let mut lines = vec![format!("{:^width$}", self.title()).bold().to_string()];

        lines.push(
            WEEKDAY_HEADERS
                .iter()
                .map(|h| format!("{:>3}", h))
                .collect::<Vec<_>>()
                .join(" ")
                .dimmed()
                .to_string(),
        );

        for week in self.weeks() {
            let row: Vec<String> = week
                .iter()
                .map(|cell| match cell {
                    Cell::Blank => "   ".to_string(),
                    Cell::Day(day) => day.render(),
                })
                .collect();
            lines.push(row.join(" "));
        }

        lines.join("\n")
    }
}

impl Render for Selection {
    fn render(&self) -> String {
        let check_in = date_label(&self.check_in_str());
        let check_out = date_label(&self.check_out_str());

        let mut line = format!(
            "{} {}   {} {}",
            "Check-in:".dimmed(),
            check_in,
            "Check-out:".dimmed(),
            check_out,
        );

        if let Some(nights) = self.nights() {
            let count = format!("   ({} {})", nights, pluralize("night", nights));
            line.push_str(&count.dimmed().to_string());
        }

        line
    }
}

impl Render for ClickOutcome {
    fn render(&self) -> String {
        match self {
            ClickOutcome::CheckInSet(date) => format!("{} check-in {}", "+".green(), date),
            ClickOutcome::CheckOutSet(date) => format!("{} check-out {}", "+".green(), date),
            ClickOutcome::Cleared => format!("{} cleared", "~".yellow()),
            ClickOutcome::Rejected(error) => format!("{} {}", "✗".red(), error.to_string().red()),
            ClickOutcome::Disabled => "  date is before the earliest check-in".dimmed().to_string(),
            ClickOutcome::OutOfMonth => "  no such day this month".dimmed().to_string(),
        }
    }
}

/// Legend for the colors used by the month grid.
pub fn legend() -> String {
    format!(
        "{}  {}  {}  {}",
        " 1 ".black().on_green().bold(),
        "stay".green(),
        "occupied".red().strikethrough(),
        "unavailable".dimmed()
    )
}

fn date_label(date: &str) -> String {
    if date.is_empty() {
        "—".dimmed().to_string()
    } else {
        date.bold().to_string()
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: i64) -> String {
    if count == 1 { word.to_string() } else { format!("{word}s") }
}
