//! Schedule source abstraction.
//!
//! Abstracts away how a month's schedule is retrieved so the navigation
//! logic can be driven by the HTTP backend in production and by a scripted
//! source in tests, without modification.

use anyhow::Result;
use async_trait::async_trait;
use shared::MonthSchedule;

/// Capability to fetch one month of the booking schedule.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch the schedule for `month` (1-12) of `year`.
    ///
    /// Returns one record per day of the month, ordered by day of month
    async fn fetch_month(&self, year: i32, month: u32) -> Result<MonthSchedule>;
}
