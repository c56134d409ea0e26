// src/tests/utils.rs
//
// In-memory stand-ins for the booking API, shared by router and session tests.

use crate::app::App;
use crate::domain::availability::{AvailabilitySnapshot, DateWindow, DayAvailability};
use crate::domain::eligibility::UnitType;
use crate::domain::fixtures::{date, deluxe, june_snapshot, PROPERTY};
use crate::provider::{
    ApiSession, AvailabilityProvider, BookingConfirmation, BookingRequest, BookingSubmitter,
    ProviderError,
};
use astra::{Body, Response};
use std::collections::HashMap;
use std::io::Read;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

/// Serves the June fixture calendar for `rt-deluxe` (sleeps 4) and
/// `rt-suite` (sleeps 2). `rt-missing` answers 404, `rt-offline` fails at
/// the network level.
pub struct FakeProvider {
    units: HashMap<String, UnitType>,
    calendars: HashMap<String, Vec<DayAvailability>>,
    gate: Option<(String, Mutex<Receiver<()>>)>,
    tokens: Mutex<Vec<Option<String>>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        let mut suite = deluxe(2);
        suite.id = "rt-suite".to_string();
        suite.name = "Harbor Suite".to_string();

        let days = june_snapshot().days().to_vec();

        Self {
            units: HashMap::from([
                ("rt-deluxe".to_string(), deluxe(4)),
                ("rt-suite".to_string(), suite),
            ]),
            calendars: HashMap::from([
                ("rt-deluxe".to_string(), days.clone()),
                ("rt-suite".to_string(), days),
            ]),
            gate: None,
            tokens: Mutex::new(Vec::new()),
        }
    }

    /// Replace the day list served for `room_type_id`.
    pub fn with_days(mut self, room_type_id: &str, tweak: impl FnOnce(&mut Vec<DayAvailability>)) -> Self {
        if let Some(days) = self.calendars.get_mut(room_type_id) {
            tweak(days);
        }
        self
    }

    /// Availability for `room_type_id` blocks until the returned sender fires.
    pub fn gated(mut self, room_type_id: &str) -> (Self, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        self.gate = Some((room_type_id.to_string(), Mutex::new(rx)));
        (self, tx)
    }

    /// Token seen on each call, in call order.
    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }

    fn record(&self, session: &ApiSession) {
        self.tokens
            .lock()
            .unwrap()
            .push(session.token().map(str::to_string));
    }

    fn scripted_failure(room_type_id: &str) -> Option<ProviderError> {
        match room_type_id {
            "rt-offline" => Some(ProviderError::Network("connection refused".into())),
            _ => None,
        }
    }

    fn not_found() -> ProviderError {
        ProviderError::Status {
            status: 404,
            body: "unknown room type".into(),
        }
    }
}

impl AvailabilityProvider for FakeProvider {
    fn unit_type(&self, session: &ApiSession, room_type_id: &str) -> Result<UnitType, ProviderError> {
        self.record(session);
        if let Some(err) = Self::scripted_failure(room_type_id) {
            return Err(err);
        }
        self.units
            .get(room_type_id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    fn availability(
        &self,
        session: &ApiSession,
        room_type_id: &str,
        window: DateWindow,
    ) -> Result<AvailabilitySnapshot, ProviderError> {
        self.record(session);
        if let Some((gated, rx)) = &self.gate {
            if gated == room_type_id {
                let _ = rx.lock().unwrap().recv();
            }
        }

        let days = self
            .calendars
            .get(room_type_id)
            .ok_or_else(Self::not_found)?
            .iter()
            .filter(|d| window.start <= d.date && d.date < window.end)
            .cloned()
            .collect();

        Ok(AvailabilitySnapshot::new(room_type_id, PROPERTY, 3, days)?)
    }
}

/// Records every submitted booking along with the caller's token.
#[derive(Default)]
pub struct FakeBookings {
    submitted: Mutex<Vec<(Option<String>, BookingRequest)>>,
}

impl FakeBookings {
    pub fn submitted(&self) -> Vec<(Option<String>, BookingRequest)> {
        self.submitted.lock().unwrap().clone()
    }
}

impl BookingSubmitter for FakeBookings {
    fn submit_booking(
        &self,
        session: &ApiSession,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ProviderError> {
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push((session.token().map(str::to_string), request.clone()));
        Ok(BookingConfirmation {
            booking_id: format!("bk-{}", submitted.len()),
            status: "confirmed".to_string(),
        })
    }
}

pub struct TestApp {
    pub app: App,
    pub provider: Arc<FakeProvider>,
    pub bookings: Arc<FakeBookings>,
}

fn june_first() -> chrono::NaiveDate {
    date("2024-06-01")
}

/// App over the fake provider, with "today" pinned to 2024-06-01.
pub fn init_test_app() -> TestApp {
    init_test_app_with(FakeProvider::new())
}

pub fn init_test_app_with(provider: FakeProvider) -> TestApp {
    let provider = Arc::new(provider);
    let bookings = Arc::new(FakeBookings::default());
    let app = App::new(provider.clone(), bookings.clone(), 30).with_today(june_first);

    TestApp {
        app,
        provider,
        bookings,
    }
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn get(uri: &str) -> astra::Request {
    http::Request::builder()
        .method(http::Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// The error from a handler call that should have failed.
pub fn expect_err(result: crate::errors::ResultResp) -> crate::errors::ServerError {
    match result {
        Ok(resp) => panic!("expected an error, got status {}", resp.status()),
        Err(err) => err,
    }
}
