pub mod config;
pub mod interactive;
pub mod occupied;
pub mod pick;
pub mod show;

/// Default window for `occupied` when no end date is given.
pub const OCCUPIED_WINDOW_DAYS: i64 = 90;
