// src/session/calendar.rs

use crate::domain::availability::{AvailabilitySnapshot, DateWindow, SnapshotError, StayQuote};
use crate::domain::eligibility::{booking_eligibility, Eligibility, GuestCount, Ineligible, UnitType};
use crate::domain::selection::{RangeSelector, Selection, SelectionNotice, TapOutcome};
use crate::provider::{ApiSession, AvailabilityProvider, ProviderError};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Which room type and window a calendar is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub room_type_id: String,
    pub window: DateWindow,
}

/// Issued by [`CalendarSession::begin_fetch`]; only the newest one commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

/// Everything one fetch produces. Committed together or not at all.
#[derive(Debug, Clone)]
pub struct FetchedCalendar {
    pub unit: UnitType,
    pub snapshot: AvailabilitySnapshot,
}

#[derive(Debug)]
pub enum CommitOutcome {
    Applied,
    Failed(ProviderError),
    /// A newer fetch started (or the session was torn down) first.
    Superseded,
}

#[derive(Debug)]
struct ReadyCalendar {
    unit: UnitType,
    snapshot: AvailabilitySnapshot,
    selector: RangeSelector,
    notice: Option<SelectionNotice>,
}

#[derive(Debug)]
enum View {
    Idle,
    Loading(FetchTarget),
    Ready(Box<ReadyCalendar>),
    Failed(ProviderError),
}

/// One guest's calendar: the loaded snapshot, the selection made on it, and
/// the head count.
///
/// Snapshot and selection live in the same `View` value, so replacing the
/// view drops both at once. Guests survive room-type switches.
#[derive(Debug)]
pub struct CalendarSession {
    seq: u64,
    view: View,
    guests: GuestCount,
}

impl Default for CalendarSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarSession {
    pub fn new() -> Self {
        Self {
            seq: 0,
            view: View::Idle,
            guests: GuestCount::default(),
        }
    }

    /// Clears the current calendar and returns the ticket the next result
    /// must present. Any earlier ticket stops being accepted.
    pub fn begin_fetch(&mut self, target: FetchTarget) -> FetchTicket {
        self.seq += 1;
        info!(
            seq = self.seq,
            room_type_id = %target.room_type_id,
            start = %target.window.start,
            end = %target.window.end,
            "calendar fetch started"
        );
        self.view = View::Loading(target);
        FetchTicket { seq: self.seq }
    }

    pub fn commit(
        &mut self,
        ticket: FetchTicket,
        result: Result<FetchedCalendar, ProviderError>,
    ) -> CommitOutcome {
        let target = match &self.view {
            View::Loading(target) if ticket.seq == self.seq => target.clone(),
            _ => {
                debug!(ticket = ticket.seq, current = self.seq, "discarding superseded fetch");
                return CommitOutcome::Superseded;
            }
        };

        let result = result.and_then(|fetched| {
            fetched.snapshot.ensure_room_type(&target.room_type_id)?;
            if fetched.unit.id != target.room_type_id {
                return Err(ProviderError::Snapshot(SnapshotError::RoomTypeMismatch {
                    expected: target.room_type_id.clone(),
                    actual: fetched.unit.id,
                }));
            }
            if fetched.snapshot.property_id() != fetched.unit.property_id {
                return Err(ProviderError::Snapshot(SnapshotError::PropertyMismatch {
                    expected: fetched.unit.property_id,
                    actual: fetched.snapshot.property_id().to_string(),
                }));
            }
            Ok(fetched)
        });

        match result {
            Ok(fetched) => {
                info!(
                    seq = ticket.seq,
                    room_type_id = %target.room_type_id,
                    days = fetched.snapshot.days().len(),
                    "calendar loaded"
                );
                self.view = View::Ready(Box::new(ReadyCalendar {
                    unit: fetched.unit,
                    snapshot: fetched.snapshot,
                    selector: RangeSelector::new(),
                    notice: None,
                }));
                CommitOutcome::Applied
            }
            Err(error) => {
                warn!(seq = ticket.seq, room_type_id = %target.room_type_id, %error, "calendar fetch failed");
                self.view = View::Failed(error.clone());
                CommitOutcome::Failed(error)
            }
        }
    }

    /// Teardown: drop whatever is shown and refuse any in-flight result.
    #[cfg(test)]
    pub fn cancel(&mut self) {
        self.seq += 1;
        self.view = View::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, View::Loading(_))
    }

    #[cfg(test)]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.seq == self.seq && self.is_loading()
    }

    pub fn error(&self) -> Option<&ProviderError> {
        match &self.view {
            View::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn unit(&self) -> Option<&UnitType> {
        self.ready().map(|r| &r.unit)
    }

    pub fn snapshot(&self) -> Option<&AvailabilitySnapshot> {
        self.ready().map(|r| &r.snapshot)
    }

    pub fn selection(&self) -> Selection {
        self.ready()
            .map(|r| r.selector.selection())
            .unwrap_or_default()
    }

    /// Message from the last refused tap or resume, if any.
    pub fn notice(&self) -> Option<&SelectionNotice> {
        self.ready().and_then(|r| r.notice.as_ref())
    }

    #[cfg(test)]
    pub fn guests(&self) -> GuestCount {
        self.guests
    }

    pub fn set_guests(&mut self, guests: GuestCount) {
        self.guests = guests;
    }

    /// `None` while no calendar is loaded.
    pub fn tap(&mut self, date: NaiveDate) -> Option<TapOutcome> {
        let ready = self.ready_mut()?;
        let outcome = ready.selector.tap_date(&ready.snapshot, date);
        ready.notice = outcome.notice().cloned();
        Some(outcome)
    }

    /// Restore a selection carried in from outside (saved query parameters).
    pub fn resume(&mut self, check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) {
        if let Some(ready) = self.ready_mut() {
            let (selector, notice) = RangeSelector::resume(&ready.snapshot, check_in, check_out);
            ready.selector = selector;
            ready.notice = notice;
        }
    }

    /// Recomputed on every call from the live selection, guests and snapshot.
    pub fn eligibility(&self) -> Eligibility {
        match self.ready() {
            Some(ready) => booking_eligibility(
                ready.selector.selection(),
                self.guests,
                &ready.unit,
                &ready.snapshot,
            ),
            None => Eligibility::Ineligible(Ineligible::NoRange),
        }
    }

    /// Informational price for the chosen range.
    pub fn quote(&self) -> Option<StayQuote> {
        let ready = self.ready()?;
        let range = ready.selector.selection().range()?;
        ready.snapshot.quote(range)
    }

    fn ready(&self) -> Option<&ReadyCalendar> {
        match &self.view {
            View::Ready(ready) => Some(ready.as_ref()),
            _ => None,
        }
    }

    fn ready_mut(&mut self) -> Option<&mut ReadyCalendar> {
        match &mut self.view {
            View::Ready(ready) => Some(ready.as_mut()),
            _ => None,
        }
    }
}

/// Room metadata plus the snapshot for `target`, or the first failure.
pub fn fetch_calendar(
    provider: &dyn AvailabilityProvider,
    api: &ApiSession,
    target: &FetchTarget,
) -> Result<FetchedCalendar, ProviderError> {
    let unit = provider.unit_type(api, &target.room_type_id)?;
    let snapshot = provider.availability(api, &target.room_type_id, target.window)?;
    Ok(FetchedCalendar { unit, snapshot })
}
