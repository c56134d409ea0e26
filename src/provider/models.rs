use crate::domain::availability::{AvailabilitySnapshot, DayAvailability, SnapshotError};
use crate::domain::eligibility::UnitType;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// availability response
//  ├── roomTypeId
//  ├── propertyId
//  ├── totalUnits
//  └── days[]
//       ├── date            "YYYY-MM-DD"
//       ├── availableUnits
//       ├── isClosed
//       ├── basePrice       decimal string
//       ├── adjustment      decimal string
//       └── finalPrice      decimal string

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub room_type_id: String,
    pub property_id: String,
    pub total_units: u32,
    pub days: Vec<DayRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    pub available_units: u32,
    pub is_closed: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub adjustment: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
}

impl From<DayRecord> for DayAvailability {
    fn from(r: DayRecord) -> Self {
        DayAvailability {
            date: r.date,
            available_units: r.available_units,
            is_closed: r.is_closed,
            base_price: r.base_price,
            adjustment: r.adjustment,
            final_price: r.final_price,
        }
    }
}

impl AvailabilityResponse {
    /// Validate the whole payload into a snapshot, or reject it entirely.
    pub fn into_snapshot(self, expected_room_type: &str) -> Result<AvailabilitySnapshot, SnapshotError> {
        let snapshot = AvailabilitySnapshot::new(
            self.room_type_id,
            self.property_id,
            self.total_units,
            self.days.into_iter().map(DayAvailability::from).collect(),
        )?;
        snapshot.ensure_room_type(expected_room_type)?;
        Ok(snapshot)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeResponse {
    pub id: String,
    pub property_id: String,
    pub name: String,
    pub max_guests: u32,
}

impl From<RoomTypeResponse> for UnitType {
    fn from(r: RoomTypeResponse) -> Self {
        UnitType {
            id: r.id,
            property_id: r.property_id,
            name: r.name,
            max_guests: r.max_guests,
        }
    }
}

/// Body of `POST /bookings`. Price is never sent; the backend prices the stay.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload<'a> {
    pub room_type_id: &'a str,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub rooms: u32,
}

#[derive(Debug, Deserialize)]
pub struct BookingResponse {
    pub id: String,
    pub status: String,
}
