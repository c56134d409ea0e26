// client.rs
use crate::domain::availability::{AvailabilitySnapshot, DateWindow};
use crate::domain::eligibility::UnitType;
use crate::provider::models::{AvailabilityResponse, BookingPayload, BookingResponse, RoomTypeResponse};
use crate::provider::{
    ApiSession, AvailabilityProvider, BookingConfirmation, BookingRequest, BookingSubmitter,
    ProviderError,
};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use url::Url;

const USER_AGENT: &str = concat!("stay_calendar/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client for the booking API.
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ProviderError> {
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, session: &ApiSession, req: RequestBuilder) -> RequestBuilder {
        let req = req.header(ACCEPT, mime::APPLICATION_JSON.as_ref());
        match session.token() {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        }
    }

    fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> Result<T, ProviderError> {
        let start = Instant::now();

        let resp = req
            .send()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(%status, what, elapsed = ?start.elapsed(), "provider request failed");
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::Unauthorized(format!("HTTP {status}")));
            }
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        info!(%status, what, elapsed = ?start.elapsed(), "provider request ok");

        serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

impl AvailabilityProvider for ApiClient {
    fn unit_type(&self, session: &ApiSession, room_type_id: &str) -> Result<UnitType, ProviderError> {
        let url = self.endpoint(&["room-types", room_type_id])?;
        let req = self.authorized(session, self.client.get(url));

        let body: RoomTypeResponse = self.send_json(req, "room type")?;
        Ok(body.into())
    }

    fn availability(
        &self,
        session: &ApiSession,
        room_type_id: &str,
        window: DateWindow,
    ) -> Result<AvailabilitySnapshot, ProviderError> {
        let mut url = self.endpoint(&["room-types", room_type_id, "availability"])?;
        url.query_pairs_mut()
            .append_pair("startDate", &window.start.to_string())
            .append_pair("endDate", &window.end.to_string());

        let req = self.authorized(session, self.client.get(url));
        let body: AvailabilityResponse = self.send_json(req, "availability")?;

        body.into_snapshot(room_type_id).map_err(|e| {
            warn!(room_type_id, error = %e, "rejected availability payload");
            ProviderError::Snapshot(e)
        })
    }
}

impl BookingSubmitter for ApiClient {
    fn submit_booking(
        &self,
        session: &ApiSession,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ProviderError> {
        let url = self.endpoint(&["bookings"])?;
        let payload = BookingPayload {
            room_type_id: &request.room_type_id,
            check_in: request.range.check_in,
            check_out: request.range.check_out,
            guests: request.guests,
            rooms: request.rooms,
        };

        let req = self.authorized(session, self.client.post(url).json(&payload));
        let body: BookingResponse = self.send_json(req, "booking")?;

        Ok(BookingConfirmation {
            booking_id: body.id,
            status: body.status,
        })
    }
}
