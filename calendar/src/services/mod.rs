//! Transport and orchestration around the calendar domain: the schedule
//! source abstraction, its HTTP implementation, and the async session
//! driver.

pub mod api;
pub mod session;
pub mod source;
