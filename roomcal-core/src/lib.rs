//! Core types for roomcal.
//!
//! This crate provides the room availability calendar and the data it runs on:
//! - `calendar` — the check-in / check-out picker with occupied-date blocking
//! - `grid` — the per-day render model of a month
//! - `inventory` — rooms and reservations, and the occupied dates they imply
//! - `config` — global configuration at ~/.config/roomcal/config.toml

pub mod calendar;
pub mod config;
pub mod date;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod inventory;
pub mod occupied;
pub mod selection;

pub use calendar::{
    AvailabilityCalendar, CalendarEvent, CalendarProps, ClickOutcome, EventLog, SelectionListener,
};
pub use date::MonthCursor;
pub use diagnostics::{Diagnostic, DiagnosticSink, NullSink, TracingSink};
pub use error::{RoomcalError, RoomcalResult, SelectionError};
pub use occupied::OccupiedDates;
pub use selection::Selection;
