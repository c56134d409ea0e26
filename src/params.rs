// src/params.rs
//
// Query-string / form state carried between calendar page loads. The page
// server keeps no per-guest state, so the selection travels in the URL.

use crate::domain::availability::{DateRange, DateWindow};
use crate::domain::eligibility::GuestCount;
use crate::errors::ServerError;
use chrono::NaiveDate;
use std::collections::HashMap;
use url::form_urlencoded;

/// Longest window a single calendar page may request.
pub const MAX_WINDOW_DAYS: i64 = 366;

pub fn parse_pairs(raw: &str) -> HashMap<String, String> {
    form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

pub fn parse_query(req: &astra::Request) -> HashMap<String, String> {
    req.uri().query().map(parse_pairs).unwrap_or_default()
}

fn optional_date(map: &HashMap<String, String>, key: &str) -> Result<Option<NaiveDate>, ServerError> {
    match map.get(key).map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ServerError::BadRequest(format!("{key} must be a YYYY-MM-DD date"))),
    }
}

fn count(map: &HashMap<String, String>, key: &str, default: u32) -> Result<u32, ServerError> {
    match map.get(key).map(|v| v.trim()) {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse::<u32>()
            .map_err(|_| ServerError::BadRequest(format!("{key} must be a whole number"))),
    }
}

fn room_type(map: &HashMap<String, String>) -> Result<String, ServerError> {
    map.get("room_type")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ServerError::BadRequest("room_type is required".into()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarParams {
    pub room_type: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub tap: Option<NaiveDate>,
    pub guests: GuestCount,
}

impl CalendarParams {
    pub fn parse(map: &HashMap<String, String>) -> Result<Self, ServerError> {
        Ok(Self {
            room_type: room_type(map)?,
            start: optional_date(map, "start")?,
            end: optional_date(map, "end")?,
            check_in: optional_date(map, "check_in")?,
            check_out: optional_date(map, "check_out")?,
            tap: optional_date(map, "tap")?,
            guests: GuestCount::new(count(map, "adults", 1)?, count(map, "children", 0)?),
        })
    }

    /// Requested window, defaulting to `horizon_days` from `today`.
    pub fn window(&self, today: NaiveDate, horizon_days: u32) -> Result<DateWindow, ServerError> {
        let start = self.start.unwrap_or(today);
        let end = self
            .end
            .unwrap_or_else(|| DateWindow::horizon(start, horizon_days).end);

        let window = DateWindow::new(start, end)
            .ok_or_else(|| ServerError::BadRequest("end must not be before start".into()))?;
        if window.len_days() > MAX_WINDOW_DAYS {
            return Err(ServerError::BadRequest(format!(
                "window may span at most {MAX_WINDOW_DAYS} days"
            )));
        }
        Ok(window)
    }

    /// Query string reproducing this page with the given selection.
    pub fn query_with(
        &self,
        window: DateWindow,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        tap: Option<NaiveDate>,
    ) -> String {
        let mut q = form_urlencoded::Serializer::new(String::new());
        q.append_pair("room_type", &self.room_type)
            .append_pair("start", &window.start.to_string())
            .append_pair("end", &window.end.to_string());
        if let Some(d) = check_in {
            q.append_pair("check_in", &d.to_string());
        }
        if let Some(d) = check_out {
            q.append_pair("check_out", &d.to_string());
        }
        if let Some(d) = tap {
            q.append_pair("tap", &d.to_string());
        }
        q.append_pair("adults", &self.guests.adults.to_string())
            .append_pair("children", &self.guests.children.to_string());
        q.finish()
    }
}

/// A fully specified stay, as posted from the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayParams {
    pub room_type: String,
    pub range: DateRange,
    pub guests: GuestCount,
}

impl StayParams {
    pub fn parse(map: &HashMap<String, String>) -> Result<Self, ServerError> {
        let check_in = optional_date(map, "check_in")?
            .ok_or_else(|| ServerError::BadRequest("check_in is required".into()))?;
        let check_out = optional_date(map, "check_out")?
            .ok_or_else(|| ServerError::BadRequest("check_out is required".into()))?;
        let range = DateRange::new(check_in, check_out)
            .ok_or_else(|| ServerError::BadRequest("check_out must be after check_in".into()))?;
        if range.nights() > MAX_WINDOW_DAYS {
            return Err(ServerError::BadRequest(format!(
                "stay may span at most {MAX_WINDOW_DAYS} nights"
            )));
        }

        Ok(Self {
            room_type: room_type(map)?,
            range,
            guests: GuestCount::new(count(map, "adults", 1)?, count(map, "children", 0)?),
        })
    }

    pub fn query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("room_type", &self.room_type)
            .append_pair("check_in", &self.range.check_in.to_string())
            .append_pair("check_out", &self.range.check_out.to_string())
            .append_pair("adults", &self.guests.adults.to_string())
            .append_pair("children", &self.guests.children.to_string())
            .finish()
    }
}
