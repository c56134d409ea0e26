// src/domain/eligibility.rs

use crate::domain::availability::{AvailabilitySnapshot, DateRange};
use crate::domain::selection::Selection;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuestCount {
    pub adults: u32,
    pub children: u32,
}

impl GuestCount {
    pub fn new(adults: u32, children: u32) -> Self {
        Self { adults, children }
    }

    pub fn total(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

/// Bookable room category metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitType {
    pub id: String,
    pub property_id: String,
    pub name: String,
    pub max_guests: u32,
}

/// Why the booking action is disabled. None of these are hard errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Ineligible {
    #[error("choose check-in and check-out dates")]
    NoRange,

    #[error("range not fully available: {first_gap} cannot be booked")]
    RangeUnavailable { first_gap: NaiveDate },

    #[error("calendar does not belong to this room type")]
    WrongRoomType,

    #[error("add at least one guest")]
    NoGuests,

    #[error("this room sleeps at most {max_guests} guests ({total} selected)")]
    OverCapacity { total: u32, max_guests: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible { range: DateRange, guests: u32 },
    Ineligible(Ineligible),
}

impl Eligibility {
    #[cfg(test)]
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }

    pub fn reason(&self) -> Option<&Ineligible> {
        match self {
            Eligibility::Ineligible(reason) => Some(reason),
            Eligibility::Eligible { .. } => None,
        }
    }
}

/// Derives whether the current selection may be submitted.
///
/// Recompute after any change to the selection, guests or snapshot; the
/// result is never stored.
pub fn booking_eligibility(
    selection: Selection,
    guests: GuestCount,
    unit: &UnitType,
    snapshot: &AvailabilitySnapshot,
) -> Eligibility {
    let Some(range) = selection.range() else {
        return Eligibility::Ineligible(Ineligible::NoRange);
    };

    if snapshot.room_type_id() != unit.id {
        return Eligibility::Ineligible(Ineligible::WrongRoomType);
    }

    if !snapshot.is_range_available(range.check_in, range.check_out) {
        let first_gap = snapshot
            .first_unavailable(range)
            .unwrap_or(range.check_in);
        return Eligibility::Ineligible(Ineligible::RangeUnavailable { first_gap });
    }

    let total = guests.total();
    if total == 0 {
        return Eligibility::Ineligible(Ineligible::NoGuests);
    }
    if total > unit.max_guests {
        return Eligibility::Ineligible(Ineligible::OverCapacity {
            total,
            max_guests: unit.max_guests,
        });
    }

    Eligibility::Eligible {
        range,
        guests: total,
    }
}
