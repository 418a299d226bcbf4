//! Refresh throttle: run on the leading edge, then at most one trailing run
//! per `limit` window. Calls inside the window collapse into that trailing run.
//!
//! Time is passed in by the caller, so the throttle holds no timers.

use std::time::{Duration, Instant};

/// What the caller should do with a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Run the refresh now.
    Run,
    /// A trailing run is due at the given instant; call `poll` then.
    Deferred(Instant),
}

#[derive(Clone, Debug)]
pub struct Throttle {
    limit: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl Throttle {
    pub fn new(limit: Duration) -> Throttle {
        Throttle { limit, last_run: None, pending: false }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Register a trigger at `now`.
    pub fn call(&mut self, now: Instant) -> Decision {
        match self.last_run {
            None => {
                self.last_run = Some(now);
                Decision::Run
            }
            Some(last) => {
                let due = last + self.limit;
                if now >= due {
                    self.pending = false;
                    self.last_run = Some(now);
                    Decision::Run
                } else {
                    self.pending = true;
                    Decision::Deferred(due)
                }
            }
        }
    }

    /// Fire the trailing run if one is pending and due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due() {
            Some(due) if now >= due => {
                self.pending = false;
                self.last_run = Some(now);
                true
            }
            _ => false,
        }
    }

    /// When the pending trailing run becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        match (self.pending, self.last_run) {
            (true, Some(last)) => Some(last + self.limit),
            _ => None,
        }
    }
}
