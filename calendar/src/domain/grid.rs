//! Render model for the month grid.
//!
//! Produces the data the UI needs to draw a 7-column month view: leading
//! padding cells that align day 1 with its weekday column, then one cell per
//! day carrying the styling flags and the disabled-state predicate. Pixels,
//! CSS, and icons stay with the rendering layer.

use chrono::{Datelike, NaiveDate};
use shared::FocusMonth;

use crate::domain::{
    month_offset, navigation::SelectionState, schedule_cache::ScheduleCache, CalendarError,
};

/// How a grid cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Blank cell before day 1, aligning the grid columns
    PaddingBefore,
    /// An actual day of the displayed month
    MonthDay,
    /// Skeleton cell shown while the month's schedule is loading
    Placeholder,
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub kind: CellKind,
    /// Day of month; 0 for padding and placeholder cells
    pub day: u32,
    pub date: Option<NaiveDate>,
    pub is_today: bool,
    pub is_past: bool,
    pub is_full: bool,
    pub is_selected: bool,
}

impl DayCell {
    fn blank(kind: CellKind) -> Self {
        Self {
            kind,
            day: 0,
            date: None,
            is_today: false,
            is_past: false,
            is_full: false,
            is_selected: false,
        }
    }

    /// Disabled-state predicate the UI applies to the day button: only a
    /// non-full day at or after the anchor date can be clicked
    pub fn selectable(&self) -> bool {
        self.kind == CellKind::MonthDay && !self.is_past && !self.is_full
    }
}

/// Data side of the rendered month view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: FocusMonth,
    /// Weekday of day 1 (0 = Sunday); equals the number of leading padding cells
    pub first_weekday: u32,
    pub cells: Vec<DayCell>,
}

/// Cell count of the loading skeleton (five grid rows)
const PLACEHOLDER_CELLS: usize = 35;

impl MonthGrid {
    /// Build the grid for the displayed month from cached schedule data.
    ///
    /// Fails with `OutOfRange` if the month is not fully cached; callers
    /// only build the grid once the view is out of the loading state.
    pub fn build(
        cache: &ScheduleCache,
        anchor: NaiveDate,
        selection: &SelectionState,
    ) -> Result<MonthGrid, CalendarError> {
        let month = selection.displayed;
        let offset = month_offset::offset_between(cache.anchor_month(), month);
        let first_weekday = month.first_day().weekday().num_days_from_sunday();

        let mut cells = Vec::new();
        for _ in 0..first_weekday {
            cells.push(DayCell::blank(CellKind::PaddingBefore));
        }
        for day in 1..=month_offset::days_in_month(month.year, month.month) {
            let record = cache.get(offset, day)?;
            let date = record.date;
            cells.push(DayCell {
                kind: CellKind::MonthDay,
                day,
                date: Some(date),
                is_today: date == anchor,
                is_past: date < anchor,
                is_full: record.is_full,
                is_selected: date == selection.selected_day,
            });
        }

        Ok(MonthGrid {
            month,
            first_weekday,
            cells,
        })
    }

    /// Non-interactive skeleton shown while the month's schedule loads
    pub fn placeholder(month: FocusMonth) -> MonthGrid {
        MonthGrid {
            month,
            first_weekday: 0,
            cells: vec![DayCell::blank(CellKind::Placeholder); PLACEHOLDER_CELLS],
        }
    }
}
