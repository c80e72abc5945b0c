//! Navigation state machine for the availability calendar.
//!
//! `CalendarController` owns the anchor date, the schedule cache, and the
//! current selection, and reacts to discrete events: user navigation, day
//! clicks, and fetch completions. Every operation is a synchronous state
//! transition that returns a [`CalendarEffect`] for the caller to carry out,
//! which keeps the whole flow a single-threaded event loop with no locks.
//!
//! ## Ordering discipline
//!
//! A fetch completion enters through [`CalendarController::on_month_data_ready`],
//! which appends to the cache and re-runs the availability scan as one
//! reaction, so the scanner can never observe a half-updated cache. A
//! per-offset in-flight marker plus the cache's contiguous-append check make
//! duplicate and out-of-order completions harmless.

use chrono::{Datelike, NaiveDate};
use log::{debug, info, warn};
use shared::{DayRecord, FocusMonth, MonthSchedule};

use crate::domain::{
    month_offset,
    scanner::{self, ScanOutcome},
    schedule_cache::ScheduleCache,
    CalendarError, ScanPolicy,
};

/// Where the view currently is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    /// A schedule fetch is outstanding; the grid shows the placeholder and
    /// accepts no interaction
    Loading,
    /// Schedule data for the displayed month is present and interactive
    Ready,
    /// The last fetch failed; [`CalendarController::retry`] re-issues it
    FetchFailed { offset: i32 },
}

/// The currently selected day and displayed month.
///
/// Invariants: `selected_day` falls within `displayed`, and is never
/// strictly before the anchor date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_day: NaiveDate,
    pub displayed: FocusMonth,
}

/// Reaction the caller must carry out after a controller transition.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEffect {
    /// Nothing to do
    None,
    /// Issue exactly one remote fetch for the month at `offset`
    Fetch { offset: i32, year: i32, month: u32 },
    /// Selection finalized; hand the record to the date-selected callback
    Selected(DayRecord),
}

/// State machine over the selection, cache, and view phase.
pub struct CalendarController {
    anchor: NaiveDate,
    policy: ScanPolicy,
    cache: ScheduleCache,
    selection: SelectionState,
    phase: ViewPhase,
    /// Offset of the one outstanding fetch, if any
    in_flight: Option<i32>,
    /// Where the scan currently in progress started; anchors the horizon
    /// bound across fetch-and-resume round trips
    scan_origin: NaiveDate,
}

impl CalendarController {
    /// Create a controller anchored at `anchor` ("today"). The anchor is
    /// immutable for the controller's lifetime and defines offset 0.
    pub fn new(anchor: NaiveDate, policy: ScanPolicy) -> Self {
        let displayed = FocusMonth::of(anchor);
        Self {
            anchor,
            policy,
            cache: ScheduleCache::new(displayed),
            selection: SelectionState {
                selected_day: anchor,
                displayed,
            },
            phase: ViewPhase::Loading,
            in_flight: None,
            scan_origin: anchor,
        }
    }

    /// Convenience constructor anchored at the local calendar date
    pub fn today(policy: ScanPolicy) -> Self {
        Self::new(chrono::Local::now().date_naive(), policy)
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn cache(&self) -> &ScheduleCache {
        &self.cache
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ViewPhase::Loading
    }

    /// Disabled-state predicate for the previous-month control: paging back
    /// stops at the anchor month
    pub fn can_go_previous(&self) -> bool {
        self.phase == ViewPhase::Ready && self.selection.displayed != FocusMonth::of(self.anchor)
    }

    /// Disabled-state predicate for the next-month control
    pub fn can_go_next(&self) -> bool {
        if self.phase != ViewPhase::Ready {
            return false;
        }
        match self.policy.max_months_ahead {
            Some(limit) => self.displayed_offset() < limit as i32,
            None => true,
        }
    }

    /// Initial reaction: fetch the anchor month. The view starts loading
    /// with the anchor date tentatively selected.
    pub fn start(&mut self) -> CalendarEffect {
        self.request_fetch(0)
    }

    /// Page back one month. A no-op when the displayed month is already the
    /// anchor month (navigation is clamped at "today") or while the grid is
    /// not interactive. When the prior month is the anchor month the scan
    /// restarts from the anchor date itself, never from before it.
    pub fn previous_month(&mut self) -> Result<CalendarEffect, CalendarError> {
        if !self.can_go_previous() {
            debug!("🗓️ CALENDAR: previous-month ignored (at anchor month or not ready)");
            return Ok(CalendarEffect::None);
        }

        let prior = self.selection.displayed.prev();
        let anchor_month = FocusMonth::of(self.anchor);
        let start = if prior == anchor_month {
            self.anchor
        } else {
            prior.first_day()
        };
        info!("🗓️ CALENDAR: paging back to {}", prior);
        self.begin_scan(start)
    }

    /// Page forward one month. If the target month is cached the selection
    /// moves to its first available day right away; otherwise the view
    /// enters the loading state and a single fetch is issued.
    pub fn next_month(&mut self) -> Result<CalendarEffect, CalendarError> {
        if !self.can_go_next() {
            debug!("🗓️ CALENDAR: next-month ignored (paging window or not ready)");
            return Ok(CalendarEffect::None);
        }

        let following = self.selection.displayed.next();
        let offset = self.offset_of(following);
        info!("🗓️ CALENDAR: paging forward to {}", following);
        if self.cache.covers(offset) {
            self.begin_scan(following.first_day())
        } else {
            // Selection tentatively parks on day 1; the scan is deferred
            // until the month's data lands
            self.selection = SelectionState {
                selected_day: following.first_day(),
                displayed: following,
            };
            self.scan_origin = following.first_day();
            Ok(self.request_fetch(offset))
        }
    }

    /// Direct selection of a clicked day. No scan runs; the grid only makes
    /// selectable days clickable (not full, not before the anchor), so the
    /// predicate is not re-validated here.
    pub fn select_day(&mut self, date: NaiveDate) -> Result<CalendarEffect, CalendarError> {
        if self.phase != ViewPhase::Ready {
            debug!("🗓️ CALENDAR: day click ignored while not ready");
            return Ok(CalendarEffect::None);
        }

        let offset = self.offset_of(FocusMonth::of(date));
        let record = self.cache.get(offset, date.day())?.clone();
        self.selection = SelectionState {
            selected_day: date,
            displayed: FocusMonth::of(date),
        };
        info!("🗓️ CALENDAR: day {} selected by click", date);
        Ok(CalendarEffect::Selected(record))
    }

    /// Single reaction to a completed fetch: append the month, then re-run
    /// the availability scan. A completion whose offset is not the next
    /// append index is stale (duplicate or out-of-order) and is dropped
    /// before it can corrupt the contiguous cache.
    pub fn on_month_data_ready(
        &mut self,
        offset: i32,
        schedule: MonthSchedule,
    ) -> Result<CalendarEffect, CalendarError> {
        if self.in_flight == Some(offset) {
            self.in_flight = None;
        }

        let expected = self.cache.next_offset() as i32;
        if offset != expected {
            warn!(
                "🗓️ CALENDAR: dropping stale schedule for offset {} (expected {})",
                offset, expected
            );
            return Ok(CalendarEffect::None);
        }
        self.cache.append(schedule)?;
        info!(
            "🗓️ CALENDAR: schedule cached for offset {} ({} months covered)",
            offset,
            self.cache.len()
        );

        if offset == self.displayed_offset() {
            self.resume_scan(self.selection.selected_day)
        } else {
            // Data for a month the user has already paged past; keep it,
            // but the displayed month owes its scan to a different fetch
            Ok(CalendarEffect::None)
        }
    }

    /// Record a failed fetch. The view leaves the loading state for an
    /// explicit error phase so the caller can offer a retry.
    pub fn on_fetch_failed(&mut self, offset: i32, reason: &str) {
        warn!(
            "🗓️ CALENDAR: schedule fetch failed for offset {}: {}",
            offset, reason
        );
        if self.in_flight == Some(offset) {
            self.in_flight = None;
        }
        self.phase = ViewPhase::FetchFailed { offset };
    }

    /// Re-issue the fetch that previously failed
    pub fn retry(&mut self) -> CalendarEffect {
        match self.phase {
            ViewPhase::FetchFailed { offset } => {
                info!("🗓️ CALENDAR: retrying fetch for offset {}", offset);
                self.request_fetch(offset)
            }
            _ => CalendarEffect::None,
        }
    }

    fn offset_of(&self, month: FocusMonth) -> i32 {
        month_offset::offset_between(self.cache.anchor_month(), month)
    }

    fn displayed_offset(&self) -> i32 {
        self.offset_of(self.selection.displayed)
    }

    /// Enter the loading state and emit a fetch, unless one is already
    /// outstanding for this offset
    fn request_fetch(&mut self, offset: i32) -> CalendarEffect {
        if self.in_flight == Some(offset) {
            debug!("🗓️ CALENDAR: fetch for offset {} already in flight", offset);
            return CalendarEffect::None;
        }
        self.in_flight = Some(offset);
        self.phase = ViewPhase::Loading;

        let month = month_offset::month_at_offset(self.cache.anchor_month(), offset);
        info!("🗓️ CALENDAR: fetching schedule for {} (offset {})", month, offset);
        CalendarEffect::Fetch {
            offset,
            year: month.year,
            month: month.month,
        }
    }

    /// Start a fresh scan at `start` (a user-initiated navigation)
    fn begin_scan(&mut self, start: NaiveDate) -> Result<CalendarEffect, CalendarError> {
        self.scan_origin = start;
        self.resume_scan(start)
    }

    /// Run the scanner from `cursor` and apply its outcome: finalize the
    /// selection, or park it on the first uncovered day and fetch that month
    fn resume_scan(&mut self, cursor: NaiveDate) -> Result<CalendarEffect, CalendarError> {
        match scanner::find_first_available(&self.cache, cursor, self.scan_origin, &self.policy) {
            Ok(ScanOutcome::Found { date, record }) => {
                self.selection = SelectionState {
                    selected_day: date,
                    displayed: FocusMonth::of(date),
                };
                self.phase = ViewPhase::Ready;
                info!("🗓️ CALENDAR: first available day is {}", date);
                Ok(CalendarEffect::Selected(record))
            }
            Ok(ScanOutcome::NeedsFetch { offset, resume_from }) => {
                self.selection = SelectionState {
                    selected_day: resume_from,
                    displayed: FocusMonth::of(resume_from),
                };
                Ok(self.request_fetch(offset))
            }
            Err(err) => {
                // Explicit outcome, not a stuck spinner: the view stays
                // interactive on whatever the selection last was
                self.phase = ViewPhase::Ready;
                Err(err)
            }
        }
    }
}
