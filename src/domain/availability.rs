// src/domain/availability.rs

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

/// One calendar date of sellable inventory for a single room type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub available_units: u32,
    pub is_closed: bool,
    pub base_price: Decimal,
    pub adjustment: Decimal,
    pub final_price: Decimal,
}

impl DayAvailability {
    /// A closed day is never sellable, whatever its unit count says.
    pub fn is_sellable(&self) -> bool {
        !self.is_closed && self.available_units > 0
    }
}

/// Half-open date window `[start, end)` a snapshot was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (end >= start).then_some(Self { start, end })
    }

    /// `days` nights starting at `today`.
    pub fn horizon(today: NaiveDate, days: u32) -> Self {
        let end = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }

    pub fn len_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days()
    }
}

impl From<DateRange> for DateWindow {
    fn from(range: DateRange) -> Self {
        Self {
            start: range.check_in,
            end: range.check_out,
        }
    }
}

/// A stay: check-in night through the night before check-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    /// Returns `None` unless `check_out > check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Option<Self> {
        (check_out > check_in).then_some(Self {
            check_in,
            check_out,
        })
    }

    pub fn nights(&self) -> i64 {
        self.check_out.signed_duration_since(self.check_in).num_days()
    }

    /// Every charged night, in order. The check-out date is not included.
    pub fn nights_iter(&self) -> impl Iterator<Item = NaiveDate> {
        let check_out = self.check_out;
        self.check_in.iter_days().take_while(move |d| *d < check_out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("dates out of order: {next} does not follow {prev}")]
    OutOfOrder { prev: NaiveDate, next: NaiveDate },

    #[error("missing dates between {after} and {next}")]
    Gap { after: NaiveDate, next: NaiveDate },

    #[error("final price on {date} is not base price plus adjustment")]
    PriceMismatch { date: NaiveDate },

    #[error("negative final price on {date}")]
    NegativePrice { date: NaiveDate },

    #[error("snapshot is for room type {actual}, expected {expected}")]
    RoomTypeMismatch { expected: String, actual: String },

    #[error("snapshot is for property {actual}, room type belongs to {expected}")]
    PropertyMismatch { expected: String, actual: String },
}

/// Per-day availability for one room type over a fetched window.
///
/// Construction validates the whole day list up front, so a value of this
/// type always has contiguous, strictly increasing dates with consistent
/// prices. It is never edited afterwards; a new fetch produces a new snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilitySnapshot {
    room_type_id: String,
    property_id: String,
    total_units: u32,
    days: Vec<DayAvailability>,
}

impl AvailabilitySnapshot {
    pub fn new(
        room_type_id: impl Into<String>,
        property_id: impl Into<String>,
        total_units: u32,
        days: Vec<DayAvailability>,
    ) -> Result<Self, SnapshotError> {
        for pair in days.windows(2) {
            let (prev, next) = (pair[0].date, pair[1].date);
            if next <= prev {
                return Err(SnapshotError::OutOfOrder { prev, next });
            }
            if prev.succ_opt() != Some(next) {
                return Err(SnapshotError::Gap { after: prev, next });
            }
        }

        for day in &days {
            if day.base_price + day.adjustment != day.final_price {
                return Err(SnapshotError::PriceMismatch { date: day.date });
            }
            if day.final_price < Decimal::ZERO {
                return Err(SnapshotError::NegativePrice { date: day.date });
            }
        }

        Ok(Self {
            room_type_id: room_type_id.into(),
            property_id: property_id.into(),
            total_units,
            days,
        })
    }

    pub fn room_type_id(&self) -> &str {
        &self.room_type_id
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn total_units(&self) -> u32 {
        self.total_units
    }

    pub fn days(&self) -> &[DayAvailability] {
        &self.days
    }

    pub fn ensure_room_type(&self, expected: &str) -> Result<(), SnapshotError> {
        if self.room_type_id == expected {
            Ok(())
        } else {
            Err(SnapshotError::RoomTypeMismatch {
                expected: expected.to_string(),
                actual: self.room_type_id.clone(),
            })
        }
    }

    /// Dates are contiguous, so lookup is an offset from the first day.
    pub fn day(&self, date: NaiveDate) -> Option<&DayAvailability> {
        let first = self.days.first()?.date;
        let offset = date.signed_duration_since(first).num_days();
        if offset < 0 {
            return None;
        }
        self.days.get(usize::try_from(offset).ok()?)
    }

    /// First night in `range` that is missing, closed or sold out.
    pub fn first_unavailable(&self, range: DateRange) -> Option<NaiveDate> {
        range
            .nights_iter()
            .find(|date| !self.day(*date).is_some_and(DayAvailability::is_sellable))
    }

    /// True iff `[start, end)` is non-empty and every night in it is present
    /// and sellable. Missing dates count as unavailable.
    pub fn is_range_available(&self, start: NaiveDate, end: NaiveDate) -> bool {
        match DateRange::new(start, end) {
            Some(range) => self.first_unavailable(range).is_none(),
            None => false,
        }
    }

    /// Informational price for a fully available range.
    pub fn quote(&self, range: DateRange) -> Option<StayQuote> {
        let nightly = range
            .nights_iter()
            .map(|date| {
                self.day(date)
                    .filter(|d| d.is_sellable())
                    .map(|d| (date, d.final_price))
            })
            .collect::<Option<Vec<_>>>()?;

        let total = nightly.iter().map(|(_, price)| *price).sum();

        Some(StayQuote {
            range,
            nights: range.nights(),
            total,
            nightly,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayQuote {
    pub range: DateRange,
    pub nights: i64,
    pub total: Decimal,
    pub nightly: Vec<(NaiveDate, Decimal)>,
}
