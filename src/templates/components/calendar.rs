// templates/components/calendar.rs
use crate::display::DayState;
use chrono::{Datelike, NaiveDate};
use maud::{html, Markup};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub struct DayCellVm {
    pub date: NaiveDate,
    pub state: DayState,
    pub price: String,
    /// Hover text, e.g. "2 of 3 left".
    pub title: String,
    /// Tap link; `None` for days that cannot be picked.
    pub href: Option<String>,
}

pub struct MonthVm {
    pub label: String,
    /// Empty cells before the 1st shown day, Monday-first.
    pub leading_blanks: u32,
    pub cells: Vec<DayCellVm>,
}

/// Split consecutive days into one block per calendar month.
pub fn group_by_month(cells: Vec<DayCellVm>) -> Vec<MonthVm> {
    let mut months: Vec<MonthVm> = Vec::new();

    for cell in cells {
        let starts_month = months.last().map_or(true, |m| {
            m.cells
                .last()
                .map_or(true, |prev| prev.date.month() != cell.date.month() || prev.date.year() != cell.date.year())
        });

        if starts_month {
            months.push(MonthVm {
                label: cell.date.format("%B %Y").to_string(),
                leading_blanks: cell.date.weekday().num_days_from_monday(),
                cells: Vec::new(),
            });
        }

        if let Some(month) = months.last_mut() {
            month.cells.push(cell);
        }
    }

    months
}

pub fn calendar_grid(months: &[MonthVm]) -> Markup {
    html! {
        div class="calendar" {
            @for month in months {
                section class="calendar-month" {
                    h3 { (month.label) }
                    div class="calendar-grid" {
                        @for name in WEEKDAYS {
                            span class="weekday" { (name) }
                        }
                        @for _ in 0..month.leading_blanks {
                            span class="day day-blank" {}
                        }
                        @for cell in &month.cells {
                            (day_cell(cell))
                        }
                    }
                }
            }
        }
    }
}

fn day_cell(cell: &DayCellVm) -> Markup {
    let label = cell.date.day();
    html! {
        @match &cell.href {
            Some(href) => {
                a class=(cell.state.css_class()) href=(href) data-date=(cell.date.to_string()) title=(cell.title) {
                    span class="day-number" { (label) }
                    span class="day-price" { (cell.price) }
                }
            }
            None => {
                span class=(cell.state.css_class()) data-date=(cell.date.to_string()) aria-disabled="true" title=(cell.title) {
                    span class="day-number" { (label) }
                    span class="day-price" { "—" }
                }
            }
        }
    }
}
