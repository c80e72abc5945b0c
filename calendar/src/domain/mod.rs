//! Calendar domain logic: month arithmetic, the schedule cache, the
//! availability scanner, the navigation state machine, and the grid render
//! model. Everything here is synchronous; fetch completions enter through
//! [`navigation::CalendarController::on_month_data_ready`].

pub mod grid;
pub mod month_offset;
pub mod navigation;
pub mod scanner;
pub mod schedule_cache;

use chrono::NaiveDate;

/// Errors surfaced by calendar domain operations.
///
/// Navigation-level callers convert these to view state; none of them is
/// allowed to escalate into a slice-index panic.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// Lookup against a month offset or day that has not been cached yet
    #[error("no cached schedule for month offset {offset}, day {day}")]
    OutOfRange { offset: i32, day: u32 },

    /// Append would leave a gap in the offset-indexed cache
    #[error("schedule append out of order: expected offset {expected}, got {got}")]
    NonContiguousAppend { expected: usize, got: i32 },

    /// A fetched schedule does not hold one record per day of its month
    #[error("schedule for {year}-{month:02} has {got} day entries, expected {expected}")]
    MalformedSchedule {
        year: i32,
        month: u32,
        expected: u32,
        got: usize,
    },

    /// No bookable day was found within the scan horizon
    #[error("no available day within {horizon_days} days of {start}")]
    ExhaustedAvailability { start: NaiveDate, horizon_days: u32 },
}

/// Tunables for the forward availability scan and the paging window.
#[derive(Debug, Clone)]
pub struct ScanPolicy {
    /// Hard bound on how far past the scan origin the scanner may walk.
    /// An all-full stretch longer than this ends the scan with
    /// [`CalendarError::ExhaustedAvailability`].
    pub horizon_days: u32,
    /// How many months past the anchor the user may page forward;
    /// `None` leaves paging unlimited.
    pub max_months_ahead: Option<u32>,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            horizon_days: 365,
            max_months_ahead: None,
        }
    }
}
