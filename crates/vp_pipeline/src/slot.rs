//! Last-scheduled-wins holder for the displayed view.
//!
//! Every trigger takes a ticket with `schedule()` before computing. A computed
//! value is accepted by `publish()` only if its ticket is still the newest one
//! handed out, so a slow refresh that finishes after a newer one was scheduled
//! never overwrites the newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Monotonic ticket returned by `ViewSlot::schedule`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct ViewSlot<T> {
    latest: AtomicU64,
    current: Mutex<Option<(Ticket, Arc<T>)>>,
}

impl<T> Default for ViewSlot<T> {
    fn default() -> Self {
        ViewSlot { latest: AtomicU64::new(0), current: Mutex::new(None) }
    }
}

impl<T> ViewSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new trigger. Supersedes every earlier ticket.
    pub fn schedule(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// True while no newer ticket has been scheduled.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Install `value` if `ticket` is still the newest; returns whether it was accepted.
    pub fn publish(&self, ticket: Ticket, value: T) -> bool {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        // Checked under the lock so a stale publisher cannot race past a fresh one.
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, "stale view dropped");
            return false;
        }
        *guard = Some((ticket, Arc::new(value)));
        true
    }

    /// The displayed value, if any has been published.
    pub fn current(&self) -> Option<Arc<T>> {
        let guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|(_, v)| Arc::clone(v))
    }

    /// Ticket of the displayed value.
    pub fn current_ticket(&self) -> Option<Ticket> {
        let guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|(t, _)| *t)
    }
}
