use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Inline status line. `kind` picks the colour: "info", "warning" or "error".
pub fn notice(kind: &str, message: &str) -> Markup {
    html! {
        p class=(format!("notice notice-{kind}")) role="status" { (message) }
    }
}
