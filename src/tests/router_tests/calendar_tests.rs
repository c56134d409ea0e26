// src/tests/router_tests/calendar_tests.rs

use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{expect_err, body_string, get, init_test_app, init_test_app_with, FakeProvider};
use std::time::Duration;

const JUNE: &str = "/calendar?room_type=rt-deluxe&start=2024-06-01&end=2024-06-06";

#[test]
fn home_page_loads_successfully() {
    let t = init_test_app();

    let resp = handle(get("/"), &t.app).expect("Failed to handle request");

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Find your dates"));
    assert!(body.contains(r#"action="/calendar""#));
}

#[test]
fn calendar_lists_every_day_in_the_window() {
    let t = init_test_app();

    let resp = handle(get(JUNE), &t.app).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Deluxe King"));
    assert!(body.contains("Sleeps up to 4"));
    assert!(body.contains("Choose your check-in date."));
    for iso in ["2024-06-01", "2024-06-02", "2024-06-03", "2024-06-04", "2024-06-05"] {
        assert!(body.contains(&format!(r#"data-date="{iso}""#)), "missing {iso}");
    }
    assert!(body.contains("$110.00"));
    assert!(body.contains(r#"title="3 of 3 left""#));
    assert!(!body.contains("/confirm?"));
}

#[test]
fn sold_out_and_closed_days_are_labelled() {
    let provider = FakeProvider::new().with_days("rt-deluxe", |days| {
        days[1].available_units = 0;
        days[2].is_closed = true;
        days[3].available_units = 1;
    });
    let t = init_test_app_with(provider);

    let body = body_string(handle(get(JUNE), &t.app).unwrap());

    assert!(body.contains(r#"data-date="2024-06-02" aria-disabled="true" title="Sold out""#));
    assert!(body.contains(r#"data-date="2024-06-03" aria-disabled="true" title="Closed""#));
    assert!(body.contains(r#"data-date="2024-06-04" title="1 of 3 left""#));
}

#[test]
fn window_defaults_to_horizon_from_today() {
    let t = init_test_app();

    let body = body_string(handle(get("/calendar?room_type=rt-deluxe"), &t.app).unwrap());

    assert!(body.contains(r#"data-date="2024-06-01""#));
    assert!(body.contains(r#"name="end" value="2024-07-01""#));
}

#[test]
fn tapping_check_out_shows_nights_total_and_continue() {
    let t = init_test_app();

    let uri = format!("{JUNE}&check_in=2024-06-01&tap=2024-06-04&adults=2");
    let body = body_string(handle(get(&uri), &t.app).unwrap());

    assert!(body.contains("Sat, Jun 1 to Tue, Jun 4"));
    assert!(body.contains("3 nights"));
    assert!(body.contains("$330.00"));
    assert!(body.contains("day day-in-range"));
    assert!(body.contains(
        "/confirm?room_type=rt-deluxe&amp;check_in=2024-06-01&amp;check_out=2024-06-04&amp;adults=2&amp;children=0"
    ));
}

#[test]
fn first_tap_starts_a_selection() {
    let t = init_test_app();

    let body = body_string(handle(get(&format!("{JUNE}&tap=2024-06-02")), &t.app).unwrap());

    assert!(body.contains("Check-in Sun, Jun 2. Now choose your check-out date."));
    // Links from here carry the pending check-in.
    assert!(body.contains("check_in=2024-06-02&amp;tap=2024-06-04"));
}

#[test]
fn range_over_closed_day_is_rejected_inline() {
    let provider = FakeProvider::new().with_days("rt-deluxe", |days| days[2].is_closed = true);
    let t = init_test_app_with(provider);

    let uri = format!("{JUNE}&check_in=2024-06-01&tap=2024-06-04");
    let resp = handle(get(&uri), &t.app).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("range not fully available: 2024-06-03 cannot be booked"));
    assert!(body.contains("Check-in Sat, Jun 1. Now choose your check-out date."));
    assert!(body.contains(r#"class="day day-unavailable" data-date="2024-06-03""#));
    assert!(!body.contains("/confirm?"));
}

#[test]
fn saved_range_over_closed_day_is_not_restored() {
    let provider = FakeProvider::new().with_days("rt-deluxe", |days| days[2].available_units = 0);
    let t = init_test_app_with(provider);

    let uri = format!("{JUNE}&check_in=2024-06-01&check_out=2024-06-05");
    let body = body_string(handle(get(&uri), &t.app).unwrap());

    assert!(body.contains("cannot be booked"));
    assert!(!body.contains("/confirm?"));
}

#[test]
fn too_many_guests_disables_continue() {
    let t = init_test_app();

    let uri = format!("{JUNE}&check_in=2024-06-01&check_out=2024-06-04&adults=4&children=1");
    let body = body_string(handle(get(&uri), &t.app).unwrap());

    assert!(body.contains("this room sleeps at most 4 guests (5 selected)"));
    assert!(body.contains("$330.00"));
    assert!(!body.contains("/confirm?"));

    let uri = format!("{JUNE}&check_in=2024-06-01&check_out=2024-06-04&adults=4&children=0");
    let body = body_string(handle(get(&uri), &t.app).unwrap());
    assert!(body.contains("/confirm?"));
}

#[test]
fn upstream_failures_render_inline() {
    let t = init_test_app();

    let resp = handle(get("/calendar?room_type=rt-missing&check_in=2024-06-01"), &t.app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("This room type could not be found."));
    assert!(body.contains("Try again"));
    assert!(!body.contains("data-date="));

    let body = body_string(handle(get("/calendar?room_type=rt-offline"), &t.app).unwrap());
    assert!(body.contains("We could not reach the booking service."));
}

#[test]
fn slow_availability_renders_a_timeout_inline() {
    let (provider, release) = FakeProvider::new().gated("rt-deluxe");
    let t = init_test_app_with(provider);
    let app = t.app.clone().with_fetch_timeout(Duration::from_millis(50));

    let resp = handle(get(&format!("{JUNE}&check_in=2024-06-01&tap=2024-06-03")), &app).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("The booking service took too long to answer."));
    assert!(body.contains("Try again"));
    assert!(!body.contains("data-date="));
    assert!(!body.contains("/confirm?"));

    release.send(()).unwrap();
}

#[test]
fn api_token_cookie_is_forwarded() {
    let t = init_test_app();

    let mut req = get(JUNE);
    req.headers_mut()
        .insert("cookie", "theme=dark; api_token=tok-123".parse().unwrap());
    handle(req, &t.app).unwrap();

    handle(get(JUNE), &t.app).unwrap();

    assert_eq!(
        t.provider.tokens(),
        vec![Some("tok-123".to_string()), Some("tok-123".to_string()), None, None]
    );
}

#[test]
fn quoted_and_encoded_token_cookie_is_decoded() {
    let t = init_test_app();

    let mut req = get(JUNE);
    req.headers_mut()
        .insert("cookie", r#"api_token="tok%2B1%3D"; theme=dark"#.parse().unwrap());
    handle(req, &t.app).unwrap();

    assert_eq!(
        t.provider.tokens(),
        vec![Some("tok+1=".to_string()), Some("tok+1=".to_string())]
    );
}

#[test]
fn empty_token_cookie_is_anonymous() {
    let t = init_test_app();

    let mut req = get(JUNE);
    req.headers_mut().insert("cookie", r#"api_token="""#.parse().unwrap());
    handle(req, &t.app).unwrap();

    assert_eq!(t.provider.tokens(), vec![None, None]);
}

#[test]
fn malformed_queries_are_bad_requests() {
    let t = init_test_app();

    for uri in [
        "/calendar",
        "/calendar?room_type=rt-deluxe&start=June",
        "/calendar?room_type=rt-deluxe&adults=two",
        "/calendar?room_type=rt-deluxe&start=2024-06-05&end=2024-06-01",
    ] {
        let err = expect_err(handle(get(uri), &t.app));
        assert!(matches!(err, ServerError::BadRequest(_)), "{uri}: {err:?}");
    }
}

#[test]
fn unknown_routes_are_not_found() {
    let t = init_test_app();

    assert!(matches!(
        handle(get("/nope"), &t.app),
        Err(ServerError::NotFound)
    ));
}
