//! vp_pipeline: session state over a shared, immutable universe.
//!
//! A `Session` owns the user-facing state (pins and outcome filter) and derives a
//! `View` on demand. The universe is built once per scenario and shared by `Arc`;
//! nothing here mutates it.

#![forbid(unsafe_code)]

use std::sync::Arc;

use thiserror::Error;
use vp_algo::{filter_and_aggregate, Constraints, FilterError, MarginScale, Stats, Universe};
use vp_core::{Candidate, FilterClass, Outcome};
use vp_io::{Preset, Scenario};

pub mod pins;
pub mod slot;
pub mod throttle;

pub use pins::{PinBoard, PinState};
pub use slot::{Ticket, ViewSlot};
pub use throttle::{Decision, Throttle};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Build the shared universe for a scenario.
pub fn build_universe(scenario: &Scenario) -> Arc<Universe> {
    Arc::new(Universe::build(scenario.regions.clone(), scenario.params.clone()))
}

/// Derived display state: filtered outcomes, path stats, margin scale.
#[derive(Clone, Debug)]
pub struct View {
    universe: Arc<Universe>,
    pub constraints: Constraints,
    pub outcome_filter: FilterClass,
    /// Copies of the matching outcomes, ascending id.
    pub outcomes: Vec<Outcome>,
    pub stats: Stats,
    pub scale: MarginScale,
}

impl View {
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    universe: Arc<Universe>,
    pins: PinBoard,
    outcome_filter: FilterClass,
    presets: Vec<Preset>,
}

impl Session {
    /// Fresh session: nothing pinned, filter `All`.
    pub fn new(universe: Arc<Universe>) -> Session {
        let pins = PinBoard::new(universe.regions());
        Session { universe, pins, outcome_filter: FilterClass::All, presets: Vec::new() }
    }

    /// Session with preset pins applied.
    pub fn with_presets(universe: Arc<Universe>, presets: &[Preset]) -> Result<Session, SessionError> {
        let mut s = Session::new(universe);
        s.presets = presets.to_vec();
        s.apply_presets()?;
        Ok(s)
    }

    /// Clear all pins and re-apply the session's presets.
    pub fn apply_presets(&mut self) -> Result<(), SessionError> {
        self.pins.clear();
        for p in &self.presets {
            self.pins.set(p.region.as_str(), Some(p.candidate))?;
        }
        Ok(())
    }

    pub fn universe(&self) -> &Arc<Universe> {
        &self.universe
    }

    pub fn pins(&self) -> &PinBoard {
        &self.pins
    }

    pub fn pin_state(&self, region: &str) -> Result<PinState, SessionError> {
        self.pins.state(region)
    }

    /// One click on a region button.
    pub fn toggle(&mut self, region: &str) -> Result<PinState, SessionError> {
        self.pins.toggle(region)
    }

    pub fn pin(&mut self, region: &str, candidate: Candidate) -> Result<(), SessionError> {
        self.pins.set(region, Some(candidate))
    }

    pub fn unpin(&mut self, region: &str) -> Result<(), SessionError> {
        self.pins.set(region, None)
    }

    pub fn clear_pins(&mut self) {
        self.pins.clear();
    }

    pub fn outcome_filter(&self) -> FilterClass {
        self.outcome_filter
    }

    pub fn set_outcome_filter(&mut self, filter: FilterClass) {
        self.outcome_filter = filter;
    }

    pub fn constraints(&self) -> Constraints {
        self.pins.constraints()
    }

    /// Re-derive the view from the shared universe and the current pins/filter.
    pub fn refresh(&self) -> Result<View, SessionError> {
        let constraints = self.constraints();
        let fv = filter_and_aggregate(&self.universe, &constraints, self.outcome_filter)?;
        let outcomes: Vec<Outcome> = fv.outcomes.iter().map(|o| **o).collect();
        tracing::debug!(
            pinned = constraints.len(),
            filter = %self.outcome_filter,
            shown = outcomes.len(),
            "session refreshed"
        );
        Ok(View {
            universe: Arc::clone(&self.universe),
            constraints,
            outcome_filter: self.outcome_filter,
            outcomes,
            stats: fv.stats,
            scale: fv.scale,
        })
    }

    /// Schedule, compute and publish in one step; returns whether the view was accepted.
    pub fn refresh_into(&self, slot: &ViewSlot<View>) -> Result<bool, SessionError> {
        let ticket = slot.schedule();
        let view = self.refresh()?;
        Ok(slot.publish(ticket, view))
    }
}
