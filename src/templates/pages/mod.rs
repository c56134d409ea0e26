pub mod booked;
pub mod calendar;
pub mod confirm;
pub mod home;

pub use booked::{booked_page, BookedVm};
pub use calendar::{calendar_page, CalendarVm, QuoteVm};
pub use confirm::{confirm_page, ConfirmVm};
pub use home::home_page;
