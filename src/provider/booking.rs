// src/provider/booking.rs

use crate::domain::availability::DateRange;
use crate::domain::eligibility::{Eligibility, UnitType};

/// What the booking endpoint needs: room type, dates, head count, rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub room_type_id: String,
    pub range: DateRange,
    pub guests: u32,
    pub rooms: u32,
}

impl BookingRequest {
    /// Only an eligible selection can become a request.
    pub fn from_eligibility(unit: &UnitType, eligibility: &Eligibility) -> Option<Self> {
        match eligibility {
            Eligibility::Eligible { range, guests } => Some(Self {
                room_type_id: unit.id.clone(),
                range: *range,
                guests: *guests,
                rooms: 1,
            }),
            Eligibility::Ineligible(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub status: String,
}
