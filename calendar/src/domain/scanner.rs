//! Forward scan for the first bookable day.

use chrono::{Datelike, Duration, NaiveDate};
use log::debug;
use shared::{DayRecord, FocusMonth};

use crate::domain::{month_offset, schedule_cache::ScheduleCache, CalendarError, ScanPolicy};

/// Result of a forward availability scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// First non-full day at or after the requested start
    Found { date: NaiveDate, record: DayRecord },
    /// The scan reached a month whose schedule has not been fetched yet;
    /// the caller fetches `offset` and resumes from `resume_from`
    NeedsFetch { offset: i32, resume_from: NaiveDate },
}

/// Find the first day at or after `cursor` whose record is not full.
///
/// The month offset is re-resolved for every day, so crossing a month
/// boundary into uncovered data yields [`ScanOutcome::NeedsFetch`] instead
/// of an index fault. The scanner never issues fetches itself.
///
/// `origin` is where the overall scan began (it survives fetch-and-resume
/// round trips) and anchors the horizon bound: once the cursor is more than
/// `policy.horizon_days` past it, the scan ends with
/// [`CalendarError::ExhaustedAvailability`].
///
/// Precondition: `cursor` is never before the anchor date; the navigation
/// layer clamps it before calling.
pub fn find_first_available(
    cache: &ScheduleCache,
    cursor: NaiveDate,
    origin: NaiveDate,
    policy: &ScanPolicy,
) -> Result<ScanOutcome, CalendarError> {
    // Fresh date value per iteration; nothing aliases the caller's selection
    let mut date = cursor;
    loop {
        if (date - origin).num_days() > policy.horizon_days as i64 {
            return Err(CalendarError::ExhaustedAvailability {
                start: origin,
                horizon_days: policy.horizon_days,
            });
        }

        let offset = month_offset::offset_between(cache.anchor_month(), FocusMonth::of(date));
        match cache.try_get(offset, date.day()) {
            None => {
                debug!("scan hit uncovered month at {} (offset {})", date, offset);
                return Ok(ScanOutcome::NeedsFetch {
                    offset,
                    resume_from: date,
                });
            }
            Some(record) if record.is_full => {
                date = date + Duration::days(1);
            }
            Some(record) => {
                return Ok(ScanOutcome::Found {
                    date,
                    record: record.clone(),
                });
            }
        }
    }
}
