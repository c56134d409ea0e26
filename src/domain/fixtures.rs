// src/domain/fixtures.rs
//
// Shared test data: a five-night June calendar and small builders.

use crate::domain::availability::{AvailabilitySnapshot, DayAvailability, SnapshotError};
use crate::domain::eligibility::UnitType;
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub const ROOM_TYPE: &str = "rt-deluxe";
pub const PROPERTY: &str = "p-harbor";

pub fn date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").unwrap()
}

/// A sellable day priced at a whole-unit amount with no adjustment.
pub fn day(iso: &str, units: u32, price: i64) -> DayAvailability {
    DayAvailability {
        date: date(iso),
        available_units: units,
        is_closed: false,
        base_price: Decimal::new(price, 0),
        adjustment: Decimal::ZERO,
        final_price: Decimal::new(price, 0),
    }
}

pub fn snapshot_of(days: Vec<DayAvailability>) -> Result<AvailabilitySnapshot, SnapshotError> {
    AvailabilitySnapshot::new(ROOM_TYPE, PROPERTY, 3, days)
}

/// 2024-06-01 ..= 2024-06-05, three units each, priced 100, 110, 120, 90, 100.
pub fn june_snapshot() -> AvailabilitySnapshot {
    june_snapshot_with(|_| {})
}

/// Same calendar as [`june_snapshot`] with the day list tweaked first.
pub fn june_snapshot_with(tweak: impl FnOnce(&mut Vec<DayAvailability>)) -> AvailabilitySnapshot {
    let mut days = vec![
        day("2024-06-01", 3, 100),
        day("2024-06-02", 3, 110),
        day("2024-06-03", 3, 120),
        day("2024-06-04", 3, 90),
        day("2024-06-05", 3, 100),
    ];
    tweak(&mut days);
    snapshot_of(days).unwrap()
}

pub fn deluxe(max_guests: u32) -> UnitType {
    UnitType {
        id: ROOM_TYPE.to_string(),
        property_id: PROPERTY.to_string(),
        name: "Deluxe King".to_string(),
        max_guests,
    }
}
