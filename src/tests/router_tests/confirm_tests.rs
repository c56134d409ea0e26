// src/tests/router_tests/confirm_tests.rs

use crate::errors::ServerError;
use crate::provider::ProviderError;
use crate::router::handle;
use crate::templates::html_error_response;
use crate::tests::utils::{expect_err, body_string, get, init_test_app, init_test_app_with, FakeProvider};
use std::time::Duration;

#[test]
fn confirm_page_shows_breakdown_and_form() {
    let t = init_test_app();

    let resp = handle(
        get("/confirm?room_type=rt-deluxe&check_in=2024-06-01&check_out=2024-06-04&adults=2"),
        &t.app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Confirm your stay"));
    assert!(body.contains("Sat, Jun 1 to Tue, Jun 4"));
    assert!(body.contains("$120.00"));
    assert!(body.contains("$330.00"));
    assert!(body.contains(r#"action="/bookings""#));
    assert!(body.contains(r#"name="check_out" value="2024-06-04""#));
}

#[test]
fn confirm_page_refuses_a_stay_that_sold_out() {
    let provider = FakeProvider::new().with_days("rt-deluxe", |days| days[1].available_units = 0);
    let t = init_test_app_with(provider);

    let body = body_string(
        handle(
            get("/confirm?room_type=rt-deluxe&check_in=2024-06-01&check_out=2024-06-04"),
            &t.app,
        )
        .unwrap(),
    );

    assert!(body.contains("2024-06-02 cannot be booked"));
    assert!(body.contains("Pick other dates"));
    assert!(!body.contains(r#"action="/bookings""#));
}

#[test]
fn confirm_requires_an_increasing_range() {
    let t = init_test_app();

    let err = expect_err(handle(
        get("/confirm?room_type=rt-deluxe&check_in=2024-06-04&check_out=2024-06-01"),
        &t.app,
    ));

    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn confirm_upstream_failure_becomes_error_page() {
    let t = init_test_app();

    let err = expect_err(handle(
        get("/confirm?room_type=rt-offline&check_in=2024-06-01&check_out=2024-06-04"),
        &t.app,
    ));
    assert!(matches!(err, ServerError::Upstream(ProviderError::Network(_))));

    let resp = html_error_response(err);
    assert_eq!(resp.status(), 502);
    assert!(body_string(resp).contains("We could not reach the booking service."));
}

#[test]
fn confirm_timeout_is_a_gateway_timeout() {
    let (provider, release) = FakeProvider::new().gated("rt-deluxe");
    let t = init_test_app_with(provider);
    let app = t.app.clone().with_fetch_timeout(Duration::from_millis(50));

    let err = expect_err(handle(
        get("/confirm?room_type=rt-deluxe&check_in=2024-06-01&check_out=2024-06-04"),
        &app,
    ));
    assert!(matches!(err, ServerError::Upstream(ProviderError::Timeout(_))));

    let resp = html_error_response(err);
    assert_eq!(resp.status(), 504);
    assert!(body_string(resp).contains("took too long to answer"));

    release.send(()).unwrap();
}

#[test]
fn expired_token_is_unauthorized() {
    let resp = html_error_response(ServerError::Upstream(ProviderError::Unauthorized(
        "token expired".into(),
    )));

    assert_eq!(resp.status(), 401);
    assert!(body_string(resp).contains("Your session has expired."));
}
