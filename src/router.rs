use crate::app::App;
use crate::display::{availability_label, day_state, format_day, format_price, format_stay, nights_label};
use crate::domain::availability::DateWindow;
use crate::domain::selection::Selection;
use crate::errors::ServerError;
use crate::params::{parse_pairs, parse_query, CalendarParams, StayParams};
use crate::provider::{ApiSession, BookingRequest};
use crate::responses::{html_response, ResultResp};
use crate::session::{CalendarSession, CommitOutcome, FetchDispatcher, FetchTarget};
use crate::templates::components::{group_by_month, DayCellVm};
use crate::templates::pages::{self, BookedVm, CalendarVm, ConfirmVm, QuoteVm};
use astra::Request;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use tracing::{info, warn};

const API_TOKEN_COOKIE: &str = "api_token";
const MAX_FORM_BYTES: usize = 16 * 1024;

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    info!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(pages::home_page()),
        ("GET", "/calendar") => calendar(&req, app),
        ("GET", "/confirm") => confirm(&req, app),
        ("POST", "/bookings") => create_booking(req, app),
        _ => Err(ServerError::NotFound),
    }
}

/// The caller's API token, from the `api_token` cookie.
fn api_session(req: &Request) -> ApiSession {
    req.headers()
        .get_all("cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(cookie_token)
        .map(ApiSession::with_token)
        .unwrap_or_else(ApiSession::anonymous)
}

/// The `api_token` value in one Cookie header, unquoted and percent-decoded.
fn cookie_token(header: &str) -> Option<String> {
    let raw = header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == API_TOKEN_COOKIE)
        .map(|(_, value)| value.trim())?;

    let unquoted = raw
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(raw);

    match percent_decode_str(unquoted).decode_utf8() {
        Ok(token) if !token.is_empty() => Some(token.into_owned()),
        Ok(_) => None,
        Err(_) => {
            warn!("api_token cookie is not valid UTF-8 once decoded; ignoring it");
            None
        }
    }
}

fn read_form(req: Request) -> Result<HashMap<String, String>, ServerError> {
    let mut raw = String::new();
    req.into_body()
        .reader()
        .take(MAX_FORM_BYTES as u64 + 1)
        .read_to_string(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("could not read form: {e}")))?;
    if raw.len() > MAX_FORM_BYTES {
        return Err(ServerError::BadRequest(format!(
            "form body is larger than {MAX_FORM_BYTES} bytes"
        )));
    }
    Ok(parse_pairs(&raw))
}

/// Fetch `target` into `session` on a worker, bounded by the app's fetch timeout.
fn fetch_into(app: &App, api: &ApiSession, session: &mut CalendarSession, target: FetchTarget) -> CommitOutcome {
    FetchDispatcher::new(Arc::clone(&app.provider), api.clone()).load(session, target, app.fetch_timeout)
}

fn calendar(req: &Request, app: &App) -> ResultResp {
    let params = CalendarParams::parse(&parse_query(req))?;
    let window = params.window(app.today(), app.horizon_days)?;
    let api = api_session(req);

    let mut session = CalendarSession::new();
    session.set_guests(params.guests);

    let target = FetchTarget {
        room_type_id: params.room_type.clone(),
        window,
    };
    if let CommitOutcome::Applied = fetch_into(app, &api, &mut session, target) {
        session.resume(params.check_in, params.check_out);
        if let Some(date) = params.tap {
            session.tap(date);
        }
    }

    html_response(pages::calendar_page(&calendar_vm(&session, &params, window)))
}

fn calendar_vm(session: &CalendarSession, params: &CalendarParams, window: DateWindow) -> CalendarVm {
    let selection = session.selection();
    let (check_in, check_out) = (selection.check_in(), selection.check_out());

    let cells = session
        .snapshot()
        .map(|snapshot| {
            snapshot
                .days()
                .iter()
                .map(|day| DayCellVm {
                    date: day.date,
                    state: day_state(day, selection),
                    price: format_price(day.final_price),
                    title: availability_label(day, snapshot.total_units()),
                    href: day.is_sellable().then(|| {
                        format!("/calendar?{}", params.query_with(window, check_in, check_out, Some(day.date)))
                    }),
                })
                .collect()
        })
        .unwrap_or_default();

    let prompt = match selection {
        Selection::Empty => "Choose your check-in date.".to_string(),
        Selection::StartChosen { check_in } => {
            format!("Check-in {}. Now choose your check-out date.", format_day(check_in))
        }
        Selection::RangeChosen(range) => format_stay(range),
    };

    let eligibility = session.eligibility();
    let continue_href = session.unit().and_then(|unit| {
        BookingRequest::from_eligibility(unit, &eligibility).map(|request| {
            let stay = StayParams {
                room_type: request.room_type_id,
                range: request.range,
                guests: params.guests,
            };
            format!("/confirm?{}", stay.query())
        })
    });

    CalendarVm {
        room_type: params.room_type.clone(),
        heading: session
            .unit()
            .map(|unit| unit.name.clone())
            .unwrap_or_else(|| params.room_type.clone()),
        max_guests: session.unit().map(|unit| unit.max_guests),
        window_start: window.start,
        window_end: window.end,
        check_in,
        check_out,
        guests: params.guests,
        months: group_by_month(cells),
        prompt,
        notice: session.notice().map(ToString::to_string),
        error: session.error().map(|e| e.user_message().to_string()),
        retry_href: format!("/calendar?{}", params.query_with(window, params.check_in, params.check_out, None)),
        clear_href: (selection != Selection::Empty)
            .then(|| format!("/calendar?{}", params.query_with(window, None, None, None))),
        quote: session.quote().map(|quote| QuoteVm {
            stay: format_stay(quote.range),
            nights: nights_label(quote.nights),
            total: format_price(quote.total),
        }),
        blocked_reason: match selection {
            Selection::RangeChosen(_) => eligibility.reason().map(ToString::to_string),
            _ => None,
        },
        continue_href,
    }
}

/// Fetch the stay's own nights and re-run the selection over them.
fn load_stay(app: &App, api: &ApiSession, stay: &StayParams) -> Result<CalendarSession, ServerError> {
    let mut session = CalendarSession::new();
    session.set_guests(stay.guests);

    let target = FetchTarget {
        room_type_id: stay.room_type.clone(),
        window: DateWindow::from(stay.range),
    };
    match fetch_into(app, api, &mut session, target) {
        CommitOutcome::Applied => {}
        CommitOutcome::Failed(error) => return Err(error.into()),
        CommitOutcome::Superseded => return Err(ServerError::InternalError),
    }

    session.resume(Some(stay.range.check_in), Some(stay.range.check_out));
    Ok(session)
}

/// Refusal text for a stay that cannot be booked, if any.
fn blocked_reason(session: &CalendarSession) -> Option<String> {
    let eligibility = session.eligibility();
    let reason = eligibility.reason()?;
    Some(
        session
            .notice()
            .map(ToString::to_string)
            .unwrap_or_else(|| reason.to_string()),
    )
}

fn confirm(req: &Request, app: &App) -> ResultResp {
    let stay = StayParams::parse(&parse_query(req))?;
    let api = api_session(req);
    let session = load_stay(app, &api, &stay)?;

    let unit_name = session
        .unit()
        .map(|unit| unit.name.clone())
        .ok_or(ServerError::InternalError)?;
    let quote = session.quote();

    let back = CalendarParams {
        room_type: stay.room_type.clone(),
        start: Some(stay.range.check_in),
        end: None,
        check_in: None,
        check_out: None,
        tap: None,
        guests: stay.guests,
    };
    let back_window = back.window(app.today(), app.horizon_days)?;
    let back_href = format!(
        "/calendar?{}",
        back.query_with(back_window, Some(stay.range.check_in), Some(stay.range.check_out), None)
    );

    let vm = ConfirmVm {
        room_type: stay.room_type.clone(),
        unit_name,
        check_in: stay.range.check_in,
        check_out: stay.range.check_out,
        stay: format_stay(stay.range),
        guests: stay.guests,
        nightly: quote
            .as_ref()
            .map(|q| {
                q.nightly
                    .iter()
                    .map(|(date, price)| (format_day(*date), format_price(*price)))
                    .collect()
            })
            .unwrap_or_default(),
        nights: nights_label(stay.range.nights()),
        total: quote.map(|q| format_price(q.total)).unwrap_or_default(),
        blocked_reason: blocked_reason(&session),
        back_href,
    };

    html_response(pages::confirm_page(&vm))
}

fn create_booking(req: Request, app: &App) -> ResultResp {
    let api = api_session(&req);
    let stay = StayParams::parse(&read_form(req)?)?;
    let session = load_stay(app, &api, &stay)?;

    let unit = session.unit().ok_or(ServerError::InternalError)?;
    let Some(request) = BookingRequest::from_eligibility(unit, &session.eligibility()) else {
        let reason = blocked_reason(&session).unwrap_or_default();
        warn!(room_type_id = %stay.room_type, %reason, "booking refused");
        return Err(ServerError::BadRequest(reason));
    };

    let confirmation = app.bookings.submit_booking(&api, &request)?;
    info!(
        booking_id = %confirmation.booking_id,
        room_type_id = %request.room_type_id,
        nights = request.range.nights(),
        "booking submitted"
    );

    html_response(pages::booked_page(&BookedVm {
        booking_id: confirmation.booking_id,
        status: confirmation.status,
        unit_name: unit.name.clone(),
        stay: format_stay(request.range),
        guests: request.guests,
    }))
}
