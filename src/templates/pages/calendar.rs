// templates/pages/calendar.rs

use crate::domain::eligibility::GuestCount;
use crate::templates::components::{calendar_grid, card, notice, MonthVm};
use crate::templates::desktop_layout;
use chrono::NaiveDate;
use maud::{html, Markup};

pub struct QuoteVm {
    pub stay: String,
    pub nights: String,
    pub total: String,
}

pub struct CalendarVm {
    pub room_type: String,
    pub heading: String,
    pub max_guests: Option<u32>,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: GuestCount,
    pub months: Vec<MonthVm>,
    /// What the guest should do next.
    pub prompt: String,
    pub notice: Option<String>,
    /// Set when the calendar could not be loaded.
    pub error: Option<String>,
    pub retry_href: String,
    pub clear_href: Option<String>,
    pub quote: Option<QuoteVm>,
    pub blocked_reason: Option<String>,
    pub continue_href: Option<String>,
}

pub fn calendar_page(vm: &CalendarVm) -> Markup {
    desktop_layout(
        &vm.heading,
        html! {
            h1 { (vm.heading) }
            @if let Some(max) = vm.max_guests {
                p class="muted" { "Sleeps up to " (max) }
            }

            @if let Some(message) = &vm.error {
                (notice("error", message))
                p { a class="btn" href=(vm.retry_href) { "Try again" } }
            } @else {
                (notice("info", &vm.prompt))
                @if let Some(message) = &vm.notice {
                    (notice("warning", message))
                }

                (calendar_grid(&vm.months))

                @if let Some(href) = &vm.clear_href {
                    p { a href=(href) { "Clear dates" } }
                }

                (guest_form(vm))
                (summary(vm))
            }
        },
    )
}

fn guest_form(vm: &CalendarVm) -> Markup {
    card("Guests", html! {
        form action="/calendar" method="get" {
            input type="hidden" name="room_type" value=(vm.room_type);
            input type="hidden" name="start" value=(vm.window_start.to_string());
            input type="hidden" name="end" value=(vm.window_end.to_string());
            @if let Some(d) = vm.check_in {
                input type="hidden" name="check_in" value=(d.to_string());
            }
            @if let Some(d) = vm.check_out {
                input type="hidden" name="check_out" value=(d.to_string());
            }

            label for="adults" { "Adults" }
            input id="adults" name="adults" type="number" min="0" value=(vm.guests.adults);
            label for="children" { "Children" }
            input id="children" name="children" type="number" min="0" value=(vm.guests.children);

            button class="btn" type="submit" { "Update" }
        }
    })
}

fn summary(vm: &CalendarVm) -> Markup {
    html! {
        section class="card" id="stay-summary" {
            @if let Some(quote) = &vm.quote {
                p { (quote.stay) }
                p { strong { (quote.nights) } " · " strong class="total" { (quote.total) } }
            }
            @if let Some(reason) = &vm.blocked_reason {
                p class="muted" { (reason) }
            }
            @match &vm.continue_href {
                Some(href) => a class="btn btn-primary" href=(href) { "Continue" },
                None => button class="btn btn-primary" type="button" disabled { "Continue" },
            }
        }
    }
}
