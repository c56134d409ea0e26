mod calendar;
mod dispatch;

pub use calendar::{CalendarSession, CommitOutcome, FetchTarget};
pub use dispatch::FetchDispatcher;
