pub mod calendar;
pub mod card;
pub mod error;

pub use calendar::{calendar_grid, group_by_month, DayCellVm, MonthVm};
pub use card::{card, notice};
pub use error::html_error_response;
