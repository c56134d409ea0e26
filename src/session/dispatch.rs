// src/session/dispatch.rs

use crate::provider::{ApiSession, AvailabilityProvider, ProviderError};
use crate::session::calendar::{
    fetch_calendar, CalendarSession, CommitOutcome, FetchTarget, FetchTicket, FetchedCalendar,
};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

struct Arrival {
    ticket: FetchTicket,
    result: Result<FetchedCalendar, ProviderError>,
}

/// Runs calendar fetches off the session's thread.
///
/// Each request gets its own worker; results come back over a channel and are
/// committed on the session's thread, in arrival order, through the
/// session's ticket check. The session itself is never shared.
pub struct FetchDispatcher {
    provider: Arc<dyn AvailabilityProvider>,
    api: ApiSession,
    tx: Sender<Arrival>,
    rx: Receiver<Arrival>,
}

impl FetchDispatcher {
    pub fn new(provider: Arc<dyn AvailabilityProvider>, api: ApiSession) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            provider,
            api,
            tx,
            rx,
        }
    }

    /// Start a fetch for `target`. The session is cleared immediately.
    pub fn request(&self, session: &mut CalendarSession, target: FetchTarget) -> FetchTicket {
        let ticket = session.begin_fetch(target.clone());

        let provider = Arc::clone(&self.provider);
        let api = self.api.clone();
        let tx = self.tx.clone();

        std::thread::spawn(move || {
            let result = fetch_calendar(provider.as_ref(), &api, &target);
            // Receiver gone means the dispatcher was dropped; nothing to do.
            let _ = tx.send(Arrival { ticket, result });
        });

        ticket
    }

    /// Fetch `target` and wait for it. A fetch still running after
    /// `timeout` is committed as [`ProviderError::Timeout`]; its late result
    /// is then superseded.
    pub fn load(
        &self,
        session: &mut CalendarSession,
        target: FetchTarget,
        timeout: Duration,
    ) -> CommitOutcome {
        let room_type_id = target.room_type_id.clone();
        let ticket = self.request(session, target);

        match self.wait_current(session, timeout) {
            Some(outcome) => outcome,
            None => {
                warn!(%room_type_id, ?timeout, "calendar fetch timed out");
                session.commit(ticket, Err(ProviderError::Timeout(timeout)))
            }
        }
    }

    /// Commit everything that has arrived so far, without blocking.
    #[cfg(test)]
    pub fn pump(&self, session: &mut CalendarSession) -> Vec<CommitOutcome> {
        self.rx
            .try_iter()
            .map(|arrival| session.commit(arrival.ticket, arrival.result))
            .collect()
    }

    /// Block until the session's current fetch resolves, committing (and so
    /// discarding) any older results that arrive first.
    ///
    /// Returns `None` if nothing is in flight or `timeout` passes.
    pub fn wait_current(
        &self,
        session: &mut CalendarSession,
        timeout: Duration,
    ) -> Option<CommitOutcome> {
        let deadline = Instant::now() + timeout;

        while session.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(arrival) => match session.commit(arrival.ticket, arrival.result) {
                    CommitOutcome::Superseded => {
                        debug!("stale calendar result dropped while waiting");
                    }
                    outcome => return Some(outcome),
                },
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => return None,
            }
        }

        None
    }
}
