//! Error types for roomcal.

use thiserror::Error;

/// Errors that can occur in roomcal operations.
#[derive(Error, Debug)]
pub enum RoomcalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Inventory error: {0}")]
    Inventory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for roomcal operations.
pub type RoomcalResult<T> = Result<T, RoomcalError>;

/// A rejected day click. These are not failures of the call: the calendar
/// stays usable and its selection is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No rooms available on this date")]
    Occupied,

    #[error("Check-out date must be after check-in date")]
    DepartureBeforeArrival,

    #[error("Selected range includes unavailable dates")]
    RangeUnavailable,
}
