// templates/pages/confirm.rs

use crate::domain::eligibility::GuestCount;
use crate::templates::components::{card, notice};
use crate::templates::desktop_layout;
use chrono::NaiveDate;
use maud::{html, Markup};

pub struct ConfirmVm {
    pub room_type: String,
    pub unit_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub stay: String,
    pub guests: GuestCount,
    /// (day, price) per night, already formatted.
    pub nightly: Vec<(String, String)>,
    pub nights: String,
    pub total: String,
    /// Why the stay can no longer be booked, if it can't.
    pub blocked_reason: Option<String>,
    pub back_href: String,
}

pub fn confirm_page(vm: &ConfirmVm) -> Markup {
    desktop_layout(
        "Confirm your stay",
        html! {
            h1 { "Confirm your stay" }

            (card(&vm.unit_name, html! {
                p { (vm.stay) }
                p { (vm.guests.adults) " adults, " (vm.guests.children) " children" }

                @if vm.blocked_reason.is_none() {
                    table class="nightly" {
                        tbody {
                            @for (day, price) in &vm.nightly {
                                tr { td { (day) } td class="price" { (price) } }
                            }
                        }
                        tfoot {
                            tr { th { (vm.nights) } th class="price total" { (vm.total) } }
                        }
                    }
                    p class="muted" { "Final price is set by the property when you book." }
                }
            }))

            @match &vm.blocked_reason {
                Some(reason) => {
                    (notice("warning", reason))
                    p { a class="btn" href=(vm.back_href) { "Pick other dates" } }
                }
                None => {
                    form action="/bookings" method="post" {
                        input type="hidden" name="room_type" value=(vm.room_type);
                        input type="hidden" name="check_in" value=(vm.check_in.to_string());
                        input type="hidden" name="check_out" value=(vm.check_out.to_string());
                        input type="hidden" name="adults" value=(vm.guests.adults);
                        input type="hidden" name="children" value=(vm.guests.children);
                        button class="btn btn-primary" type="submit" { "Book now" }
                    }
                    p { a href=(vm.back_href) { "Change dates" } }
                }
            }
        },
    )
}
