//! Interactive month-view availability calendar.
//!
//! Tracks a per-day "fully booked" status fetched lazily from a backend
//! schedule source, pages between months, and keeps the selected day on the
//! first bookable (non-full, non-past) date as data arrives.
//!
//! The domain layer is a synchronous state machine ([`CalendarController`])
//! whose operations return [`CalendarEffect`]s; the services layer supplies
//! the transport ([`ScheduleSource`], [`services::api::HttpScheduleSource`])
//! and the async [`CalendarSession`] driver that executes those effects.

pub mod domain;
pub mod services;

pub use domain::navigation::{CalendarController, CalendarEffect, SelectionState, ViewPhase};
pub use domain::{CalendarError, ScanPolicy};
pub use services::session::CalendarSession;
pub use services::source::ScheduleSource;
