// src/domain/selection.rs

use crate::domain::availability::{AvailabilitySnapshot, DateRange, DayAvailability};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

/// Where the guest is in picking a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    StartChosen {
        check_in: NaiveDate,
    },
    RangeChosen(DateRange),
}

impl Selection {
    pub fn check_in(&self) -> Option<NaiveDate> {
        match self {
            Selection::Empty => None,
            Selection::StartChosen { check_in } => Some(*check_in),
            Selection::RangeChosen(range) => Some(range.check_in),
        }
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        match self {
            Selection::RangeChosen(range) => Some(range.check_out),
            _ => None,
        }
    }

    pub fn range(&self) -> Option<DateRange> {
        match self {
            Selection::RangeChosen(range) => Some(*range),
            _ => None,
        }
    }
}

/// Messages shown next to the calendar when a pick is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionNotice {
    #[error("{date} is not available")]
    DayUnavailable { date: NaiveDate },

    #[error("range not fully available: {first_gap} cannot be booked")]
    RangeUnavailable {
        range: DateRange,
        first_gap: NaiveDate,
    },

    #[error("check-out must be after check-in")]
    NotIncreasing,

    #[error("choose a check-in date first")]
    MissingCheckIn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// Closed or sold-out day; nothing changed.
    Ignored(SelectionNotice),
    /// Fresh check-in, from an empty or completed selection.
    Started { check_in: NaiveDate },
    /// Tapped on or before the pending check-in; it moves there.
    Restarted { check_in: NaiveDate },
    Completed(DateRange),
    /// A night inside the attempted range is not sellable; nothing changed.
    Rejected(SelectionNotice),
}

impl TapOutcome {
    pub fn notice(&self) -> Option<&SelectionNotice> {
        match self {
            TapOutcome::Ignored(notice) | TapOutcome::Rejected(notice) => Some(notice),
            _ => None,
        }
    }
}

/// Check-in/check-out picker over one snapshot.
///
/// Every mutation goes through [`RangeSelector::tap`], and a selection it
/// holds with both dates set has passed the range check against the snapshot
/// it was tapped on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSelector {
    selection: Selection,
}

impl RangeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn tap(&mut self, snapshot: &AvailabilitySnapshot, day: &DayAvailability) -> TapOutcome {
        let tapped = day.date;

        if !day.is_sellable() {
            debug!(%tapped, "tap on unsellable day ignored");
            return TapOutcome::Ignored(SelectionNotice::DayUnavailable { date: tapped });
        }

        let outcome = match self.selection {
            Selection::Empty | Selection::RangeChosen(_) => {
                self.selection = Selection::StartChosen { check_in: tapped };
                TapOutcome::Started { check_in: tapped }
            }
            Selection::StartChosen { check_in } if tapped <= check_in => {
                self.selection = Selection::StartChosen { check_in: tapped };
                TapOutcome::Restarted { check_in: tapped }
            }
            Selection::StartChosen { check_in } => {
                // tapped > check_in, so the range is non-empty
                let range = DateRange {
                    check_in,
                    check_out: tapped,
                };
                match snapshot.first_unavailable(range) {
                    None => {
                        self.selection = Selection::RangeChosen(range);
                        TapOutcome::Completed(range)
                    }
                    Some(first_gap) => {
                        TapOutcome::Rejected(SelectionNotice::RangeUnavailable { range, first_gap })
                    }
                }
            }
        };

        debug!(%tapped, ?outcome, selection = ?self.selection, "calendar tap");
        outcome
    }

    /// Tap by date. Dates outside the snapshot are treated as unavailable.
    pub fn tap_date(&mut self, snapshot: &AvailabilitySnapshot, date: NaiveDate) -> TapOutcome {
        match snapshot.day(date) {
            Some(day) => self.tap(snapshot, day),
            None => TapOutcome::Ignored(SelectionNotice::DayUnavailable { date }),
        }
    }

    /// Rebuild a selection from dates carried outside the session, such as
    /// saved query parameters. A pair that fails the range check keeps only
    /// its check-in, and only if that day is itself sellable.
    pub fn resume(
        snapshot: &AvailabilitySnapshot,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> (Self, Option<SelectionNotice>) {
        let start_only = |check_in: NaiveDate| match snapshot.day(check_in) {
            Some(day) if day.is_sellable() => Selection::StartChosen { check_in },
            _ => Selection::Empty,
        };

        let (selection, notice) = match (check_in, check_out) {
            (None, None) => (Selection::Empty, None),
            (None, Some(_)) => (Selection::Empty, Some(SelectionNotice::MissingCheckIn)),
            (Some(check_in), None) => {
                let selection = start_only(check_in);
                let notice = (selection == Selection::Empty)
                    .then_some(SelectionNotice::DayUnavailable { date: check_in });
                (selection, notice)
            }
            (Some(check_in), Some(check_out)) => match DateRange::new(check_in, check_out) {
                None => (start_only(check_in), Some(SelectionNotice::NotIncreasing)),
                Some(range) => match snapshot.first_unavailable(range) {
                    None => (Selection::RangeChosen(range), None),
                    Some(first_gap) => (
                        start_only(check_in),
                        Some(SelectionNotice::RangeUnavailable { range, first_gap }),
                    ),
                },
            },
        };

        (Self { selection }, notice)
    }
}
