// templates/pages/home.rs

use crate::templates::{components::card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Rooms",
        html! {
            h1 { "Find your dates" }

            (card("Room type", html! {
                form action="/calendar" method="get" {
                    label for="room_type" { "Room type ID" }
                    input id="room_type" name="room_type" type="text" required placeholder="rt-deluxe";

                    label for="adults" { "Adults" }
                    input id="adults" name="adults" type="number" min="0" value="1";

                    label for="children" { "Children" }
                    input id="children" name="children" type="number" min="0" value="0";

                    label for="start" { "From (optional)" }
                    input id="start" name="start" type="date";

                    button class="btn" type="submit" { "Show availability" }
                }
            }))
        },
    )
}
