// src/display.rs
//
// Formatting helpers shared by the calendar and confirmation pages.

use crate::domain::availability::{DateRange, DayAvailability};
use crate::domain::selection::Selection;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// "$1,234.50". Rounds half away from zero to cents.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// "Sat, Jun 1"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// "Sat, Jun 1 to Tue, Jun 4"
pub fn format_stay(range: DateRange) -> String {
    format!("{} to {}", format_day(range.check_in), format_day(range.check_out))
}

pub fn nights_label(nights: i64) -> String {
    if nights == 1 {
        "1 night".to_string()
    } else {
        format!("{nights} nights")
    }
}

/// Hover text for a calendar cell, e.g. "2 of 3 left".
pub fn availability_label(day: &DayAvailability, total_units: u32) -> String {
    if day.is_closed {
        "Closed".to_string()
    } else if day.available_units == 0 {
        "Sold out".to_string()
    } else {
        format!("{} of {} left", day.available_units, total_units)
    }
}

/// How a calendar cell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    Unavailable,
    Available,
    CheckIn,
    InRange,
    CheckOut,
}

impl DayState {
    pub fn css_class(self) -> &'static str {
        match self {
            DayState::Unavailable => "day day-unavailable",
            DayState::Available => "day day-available",
            DayState::CheckIn => "day day-check-in",
            DayState::InRange => "day day-in-range",
            DayState::CheckOut => "day day-check-out",
        }
    }
}

/// Selection markers win over availability, so a closed check-out day still
/// shows as the check-out.
pub fn day_state(day: &DayAvailability, selection: Selection) -> DayState {
    match selection {
        Selection::StartChosen { check_in } if day.date == check_in => DayState::CheckIn,
        Selection::RangeChosen(range) if day.date == range.check_in => DayState::CheckIn,
        Selection::RangeChosen(range) if day.date == range.check_out => DayState::CheckOut,
        Selection::RangeChosen(range) if range.check_in < day.date && day.date < range.check_out => {
            DayState::InRange
        }
        _ if day.is_sellable() => DayState::Available,
        _ => DayState::Unavailable,
    }
}
