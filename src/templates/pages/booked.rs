// templates/pages/booked.rs

use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

pub struct BookedVm {
    pub booking_id: String,
    pub status: String,
    pub unit_name: String,
    pub stay: String,
    pub guests: u32,
}

pub fn booked_page(vm: &BookedVm) -> Markup {
    desktop_layout(
        "Booking received",
        html! {
            h1 { "Booking received" }
            (card(&vm.unit_name, html! {
                p { (vm.stay) " · " (vm.guests) " guests" }
                p { "Reference: " strong class="booking-id" { (vm.booking_id) } }
                p { "Status: " (vm.status) }
            }))
            p { a href="/" { "Book another stay" } }
        },
    )
}
