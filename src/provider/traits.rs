use crate::domain::availability::{AvailabilitySnapshot, DateWindow};
use crate::domain::eligibility::UnitType;
use crate::provider::{ApiSession, BookingConfirmation, BookingRequest, ProviderError};

/// Source of room metadata and per-day availability.
pub trait AvailabilityProvider: Send + Sync {
    fn unit_type(&self, session: &ApiSession, room_type_id: &str)
        -> Result<UnitType, ProviderError>;

    /// The returned snapshot is validated and belongs to `room_type_id`.
    fn availability(
        &self,
        session: &ApiSession,
        room_type_id: &str,
        window: DateWindow,
    ) -> Result<AvailabilitySnapshot, ProviderError>;
}

pub trait BookingSubmitter: Send + Sync {
    fn submit_booking(
        &self,
        session: &ApiSession,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, ProviderError>;
}
