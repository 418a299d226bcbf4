//! Tri-state pins per region.
//!
//! Each region button cycles `Unpinned -> PinnedA -> PinnedB -> Unpinned`.
//! The board only ever holds regions from the universe it was built for, so
//! `constraints()` always compiles against that universe.

use vp_algo::Constraints;
use vp_core::{Candidate, RegionId, RegionSet};

use crate::SessionError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PinState {
    #[default]
    Unpinned,
    PinnedA,
    PinnedB,
}

impl PinState {
    /// Next state in the click cycle.
    pub fn next(self) -> PinState {
        match self {
            PinState::Unpinned => PinState::PinnedA,
            PinState::PinnedA => PinState::PinnedB,
            PinState::PinnedB => PinState::Unpinned,
        }
    }

    pub fn candidate(self) -> Option<Candidate> {
        match self {
            PinState::Unpinned => None,
            PinState::PinnedA => Some(Candidate::A),
            PinState::PinnedB => Some(Candidate::B),
        }
    }
}

impl From<Option<Candidate>> for PinState {
    fn from(c: Option<Candidate>) -> Self {
        match c {
            None => PinState::Unpinned,
            Some(Candidate::A) => PinState::PinnedA,
            Some(Candidate::B) => PinState::PinnedB,
        }
    }
}

/// Pin state for every region, in region order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinBoard {
    slots: Vec<(RegionId, PinState)>,
}

impl PinBoard {
    /// All regions unpinned.
    pub fn new(regions: &RegionSet) -> PinBoard {
        PinBoard { slots: regions.iter().map(|r| (r.id.clone(), PinState::Unpinned)).collect() }
    }

    fn slot_mut(&mut self, region: &str) -> Result<&mut PinState, SessionError> {
        self.slots
            .iter_mut()
            .find(|(id, _)| id.as_str() == region)
            .map(|(_, st)| st)
            .ok_or_else(|| SessionError::UnknownRegion(region.to_string()))
    }

    pub fn state(&self, region: &str) -> Result<PinState, SessionError> {
        self.slots
            .iter()
            .find(|(id, _)| id.as_str() == region)
            .map(|(_, st)| *st)
            .ok_or_else(|| SessionError::UnknownRegion(region.to_string()))
    }

    /// Advance one step in the cycle; returns the new state.
    pub fn toggle(&mut self, region: &str) -> Result<PinState, SessionError> {
        let st = self.slot_mut(region)?;
        *st = st.next();
        Ok(*st)
    }

    /// Set a region directly (`None` unpins).
    pub fn set(&mut self, region: &str, candidate: Option<Candidate>) -> Result<(), SessionError> {
        *self.slot_mut(region)? = PinState::from(candidate);
        Ok(())
    }

    pub fn clear(&mut self) {
        for (_, st) in &mut self.slots {
            *st = PinState::Unpinned;
        }
    }

    pub fn pinned_count(&self) -> usize {
        self.slots.iter().filter(|(_, st)| *st != PinState::Unpinned).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, PinState)> + '_ {
        self.slots.iter().map(|(id, st)| (id, *st))
    }

    /// Plain constraint mapping for the filter (unpinned regions omitted).
    pub fn constraints(&self) -> Constraints {
        self.slots
            .iter()
            .filter_map(|(id, st)| st.candidate().map(|c| (id.clone(), c)))
            .collect()
    }
}
