//! Append-ordered, month-indexed store of per-day availability records.
//!
//! The cache is populated one month at a time as the user pages forward.
//! Entries are indexed by month offset from the anchor month (offset 0) and
//! must stay contiguous: appending offset N requires offsets 0..N-1 to be
//! present already. Nothing is ever evicted or mutated in place; a browsing
//! session touches few enough months that unbounded growth is acceptable.

use log::debug;
use shared::{DayRecord, FocusMonth, MonthSchedule};

use crate::domain::{month_offset, CalendarError};

#[derive(Debug)]
pub struct ScheduleCache {
    anchor_month: FocusMonth,
    months: Vec<MonthSchedule>,
}

impl ScheduleCache {
    /// Create an empty cache rooted at the anchor month (offset 0)
    pub fn new(anchor_month: FocusMonth) -> Self {
        Self {
            anchor_month,
            months: Vec::new(),
        }
    }

    pub fn anchor_month(&self) -> FocusMonth {
        self.anchor_month
    }

    /// Number of months cached so far
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// True iff data for `offset` has been appended
    pub fn covers(&self, offset: i32) -> bool {
        offset >= 0 && (offset as usize) < self.months.len()
    }

    /// The offset the next append must target to keep the cache contiguous
    pub fn next_offset(&self) -> usize {
        self.months.len()
    }

    /// Append the schedule for the next sequential month offset.
    ///
    /// Validates that the schedule carries one record per day of its month
    /// and that its month lands exactly on [`Self::next_offset`]; anything
    /// else is rejected so a late or duplicate fetch completion cannot
    /// corrupt the offset indexing.
    pub fn append(&mut self, schedule: MonthSchedule) -> Result<(), CalendarError> {
        let expected_days = month_offset::days_in_month(schedule.year, schedule.month);
        if schedule.days.len() != expected_days as usize {
            return Err(CalendarError::MalformedSchedule {
                year: schedule.year,
                month: schedule.month,
                expected: expected_days,
                got: schedule.days.len(),
            });
        }

        let offset = month_offset::offset_between(
            self.anchor_month,
            FocusMonth::new(schedule.year, schedule.month),
        );
        if offset != self.months.len() as i32 {
            return Err(CalendarError::NonContiguousAppend {
                expected: self.months.len(),
                got: offset,
            });
        }

        debug!(
            "caching schedule for {} at offset {}",
            FocusMonth::new(schedule.year, schedule.month),
            offset
        );
        self.months.push(schedule);
        Ok(())
    }

    /// Coverage-checking accessor; `None` when the month or day is not
    /// populated yet. The scanner uses this instead of indexing blindly.
    pub fn try_get(&self, offset: i32, day_of_month: u32) -> Option<&DayRecord> {
        if offset < 0 || day_of_month == 0 {
            return None;
        }
        self.months
            .get(offset as usize)?
            .days
            .get(day_of_month as usize - 1)
    }

    /// Like [`Self::try_get`] but with a typed error for callers that have
    /// already established coverage
    pub fn get(&self, offset: i32, day_of_month: u32) -> Result<&DayRecord, CalendarError> {
        self.try_get(offset, day_of_month)
            .ok_or(CalendarError::OutOfRange {
                offset,
                day: day_of_month,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_schedule(year: i32, month: u32, full_days: &[u32]) -> MonthSchedule {
        let days = (1..=month_offset::days_in_month(year, month))
            .map(|day| {
                DayRecord::new(
                    NaiveDate::from_ymd_opt(year, month, day).unwrap(),
                    full_days.contains(&day),
                )
            })
            .collect();
        MonthSchedule { year, month, days }
    }

    #[test]
    fn test_append_then_covers() {
        let mut cache = ScheduleCache::new(FocusMonth::new(2024, 3));
        assert!(!cache.covers(0));

        cache.append(test_schedule(2024, 3, &[])).unwrap();
        assert!(cache.covers(0));
        assert!(!cache.covers(1));
        assert_eq!(cache.next_offset(), 1);

        cache.append(test_schedule(2024, 4, &[])).unwrap();
        assert!(cache.covers(0));
        assert!(cache.covers(1));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_append_rejects_gap() {
        let mut cache = ScheduleCache::new(FocusMonth::new(2024, 3));

        // May is offset 2; appending it before March/April must fail
        let err = cache.append(test_schedule(2024, 5, &[])).unwrap_err();
        assert!(matches!(
            err,
            CalendarError::NonContiguousAppend { expected: 0, got: 2 }
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_append_rejects_duplicate_month() {
        let mut cache = ScheduleCache::new(FocusMonth::new(2024, 3));
        cache.append(test_schedule(2024, 3, &[])).unwrap();

        let err = cache.append(test_schedule(2024, 3, &[])).unwrap_err();
        assert!(matches!(
            err,
            CalendarError::NonContiguousAppend { expected: 1, got: 0 }
        ));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_append_rejects_wrong_day_count() {
        let mut cache = ScheduleCache::new(FocusMonth::new(2024, 3));
        let mut schedule = test_schedule(2024, 3, &[]);
        schedule.days.pop();

        let err = cache.append(schedule).unwrap_err();
        assert!(matches!(
            err,
            CalendarError::MalformedSchedule {
                expected: 31,
                got: 30,
                ..
            }
        ));
    }

    #[test]
    fn test_try_get_checks_coverage() {
        let mut cache = ScheduleCache::new(FocusMonth::new(2024, 3));
        cache.append(test_schedule(2024, 3, &[15])).unwrap();

        assert!(cache.try_get(0, 15).unwrap().is_full);
        assert!(!cache.try_get(0, 16).unwrap().is_full);
        assert!(cache.try_get(0, 32).is_none()); // past end of March
        assert!(cache.try_get(0, 0).is_none()); // days are 1-based
        assert!(cache.try_get(1, 1).is_none()); // April not fetched
        assert!(cache.try_get(-1, 1).is_none()); // before the anchor month
    }

    #[test]
    fn test_get_returns_typed_error() {
        let cache = ScheduleCache::new(FocusMonth::new(2024, 3));
        let err = cache.get(0, 1).unwrap_err();
        assert!(matches!(err, CalendarError::OutOfRange { offset: 0, day: 1 }));
    }
}
