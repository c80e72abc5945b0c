//! Async driver wiring a schedule source to the navigation controller.
//!
//! Plays the role the reactive effects play in a UI shell: every user action
//! runs through the controller, and any `Fetch` effect it returns is
//! executed against the [`ScheduleSource`], with the completion fed straight
//! back into [`CalendarController::on_month_data_ready`]. That keeps
//! "fetch completion, cache append, re-scan" a single serialized reaction.
//!
//! Navigation-level errors never escape: they are logged and converted to
//! view state, matching how the UI treats them.

use log::warn;
use shared::DayRecord;

use crate::domain::grid::MonthGrid;
use crate::domain::navigation::{CalendarController, CalendarEffect, SelectionState, ViewPhase};
use crate::domain::{CalendarError, ScanPolicy};

use super::source::ScheduleSource;

type DateSelectedCallback = Box<dyn FnMut(DayRecord) + Send>;

/// One user's calendar view for the lifetime of the widget: controller,
/// transport, and the date-selected callback.
pub struct CalendarSession<S: ScheduleSource> {
    controller: CalendarController,
    source: S,
    on_date_selected: Option<DateSelectedCallback>,
}

impl<S: ScheduleSource> CalendarSession<S> {
    /// Create a session anchored at `anchor`. Call [`Self::start`] to load
    /// the anchor month and resolve the initial selection.
    pub fn new(anchor: chrono::NaiveDate, policy: ScanPolicy, source: S) -> Self {
        Self {
            controller: CalendarController::new(anchor, policy),
            source,
            on_date_selected: None,
        }
    }

    /// Register the callback invoked whenever a day becomes selected,
    /// whether by scan or by click
    pub fn on_date_selected(mut self, callback: impl FnMut(DayRecord) + Send + 'static) -> Self {
        self.on_date_selected = Some(Box::new(callback));
        self
    }

    pub fn controller(&self) -> &CalendarController {
        &self.controller
    }

    pub fn selection(&self) -> &SelectionState {
        self.controller.selection()
    }

    pub fn phase(&self) -> &ViewPhase {
        self.controller.phase()
    }

    /// Grid render model for the displayed month; the placeholder skeleton
    /// while a fetch is outstanding or failed
    pub fn month_grid(&self) -> Result<MonthGrid, CalendarError> {
        match self.controller.phase() {
            ViewPhase::Ready => MonthGrid::build(
                self.controller.cache(),
                self.controller.anchor(),
                self.controller.selection(),
            ),
            _ => Ok(MonthGrid::placeholder(self.controller.selection().displayed)),
        }
    }

    /// Load the anchor month and resolve the initial selection
    pub async fn start(&mut self) {
        let effect = self.controller.start();
        self.run(effect).await;
    }

    pub async fn previous_month(&mut self) {
        let result = self.controller.previous_month();
        self.dispatch(result).await;
    }

    pub async fn next_month(&mut self) {
        let result = self.controller.next_month();
        self.dispatch(result).await;
    }

    pub async fn select_day(&mut self, date: chrono::NaiveDate) {
        let result = self.controller.select_day(date);
        self.dispatch(result).await;
    }

    /// Re-issue the last failed fetch
    pub async fn retry(&mut self) {
        let effect = self.controller.retry();
        self.run(effect).await;
    }

    async fn dispatch(&mut self, result: Result<CalendarEffect, CalendarError>) {
        match result {
            Ok(effect) => self.run(effect).await,
            Err(err) => warn!("🗓️ CALENDAR: navigation error: {}", err),
        }
    }

    /// Execute effects until the reaction settles. A fetch completion can
    /// chain into another fetch when the scan rolls into an uncovered month.
    async fn run(&mut self, mut effect: CalendarEffect) {
        loop {
            match effect {
                CalendarEffect::None => return,
                CalendarEffect::Selected(record) => {
                    if let Some(callback) = self.on_date_selected.as_mut() {
                        callback(record);
                    }
                    return;
                }
                CalendarEffect::Fetch { offset, year, month } => {
                    match self.source.fetch_month(year, month).await {
                        Ok(schedule) => {
                            match self.controller.on_month_data_ready(offset, schedule) {
                                Ok(next) => effect = next,
                                Err(err) => {
                                    warn!("🗓️ CALENDAR: navigation error: {}", err);
                                    return;
                                }
                            }
                        }
                        Err(err) => {
                            self.controller.on_fetch_failed(offset, &format!("{:#}", err));
                            return;
                        }
                    }
                }
            }
        }
    }
}
