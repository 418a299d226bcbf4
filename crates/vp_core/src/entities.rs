//! crates/vp_core/src/entities.rs
//! Regions, candidates, winners and enumerated outcomes.
//!
//! The link between an outcome id and its assignment is a bijection:
//! bit *i* of `OutcomeId` is set iff the *i*-th region of the `RegionSet`
//! (in configured order) is assigned to candidate A.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::RegionId;

/// Upper bound on the number of regions; 2^20 outcomes is the largest
/// universe we are willing to materialize.
pub const MAX_REGIONS: usize = 20;

/* -------------------------------------------------------------------------- */
/*                                  Candidates                                */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Candidate {
    #[cfg_attr(feature = "serde", serde(rename = "a"))]
    A,
    #[cfg_attr(feature = "serde", serde(rename = "b"))]
    B,
}

impl Candidate {
    pub fn as_token(self) -> &'static str {
        match self {
            Candidate::A => "a",
            Candidate::B => "b",
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for Candidate {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Candidate::A),
            "b" => Ok(Candidate::B),
            _ => Err(CoreError::InvalidToken(s.to_owned())),
        }
    }
}

/// Classification of one outcome. `None` means neither side reached the
/// threshold and the totals are not the exact tie value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Winner {
    A,
    B,
    Tie,
    None,
}

impl Winner {
    pub fn as_token(self) -> &'static str {
        match self {
            Winner::A => "a",
            Winner::B => "b",
            Winner::Tie => "tie",
            Winner::None => "none",
        }
    }
}

impl From<Candidate> for Winner {
    fn from(c: Candidate) -> Self {
        match c {
            Candidate::A => Winner::A,
            Candidate::B => Winner::B,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/* -------------------------------------------------------------------------- */
/*                                   Regions                                  */
/* -------------------------------------------------------------------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub id: RegionId,
    pub weight: u32,
}

impl Region {
    pub fn new(id: RegionId, weight: u32) -> Self {
        Self { id, weight }
    }
}

/// Ordered, duplicate-free set of at most `MAX_REGIONS` regions.
/// Position in the set is the region's bit index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn new(regions: Vec<Region>) -> Result<Self, CoreError> {
        if regions.len() > MAX_REGIONS {
            return Err(CoreError::TooManyRegions { got: regions.len(), max: MAX_REGIONS });
        }
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for r in &regions {
            if !seen.insert(r.id.as_str()) {
                return Err(CoreError::DuplicateRegion(r.id.to_string()));
            }
        }
        Ok(Self { regions })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of outcomes in the universe of this set (2^N).
    #[inline]
    pub fn outcome_count(&self) -> u32 {
        1u32 << self.regions.len()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn as_slice(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.regions.iter().position(|r| r.id.as_str() == name)
    }

    pub fn total_weight(&self) -> u64 {
        self.regions.iter().map(|r| u64::from(r.weight)).sum()
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = core::slice::Iter<'a, Region>;
    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

/* -------------------------------------------------------------------------- */
/*                                  Outcomes                                  */
/* -------------------------------------------------------------------------- */

/// Bitmask identifying one assignment of every region to a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OutcomeId(pub u32);

impl OutcomeId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Candidate assigned to the region at `index`; `index < MAX_REGIONS`.
    #[inline]
    pub fn candidate_at(self, index: usize) -> Candidate {
        debug_assert!(index < MAX_REGIONS, "region index {index} out of range");
        if self.0 & (1u32 << index) != 0 {
            Candidate::A
        } else {
            Candidate::B
        }
    }

    /// Inverse of `candidate_at`: position *i* of `assignment` sets bit *i* when it is `A`.
    pub fn from_assignment(assignment: &[Candidate]) -> OutcomeId {
        let bits = assignment
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Candidate::A)
            .fold(0u32, |acc, (i, _)| acc | (1u32 << i));
        OutcomeId(bits)
    }
}

impl fmt::Display for OutcomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One enumerated assignment with derived totals and classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Outcome {
    pub id: OutcomeId,
    pub total_a: u64,
    pub total_b: u64,
    pub winner: Winner,
    /// Amount by which the winning total exceeds the threshold; 0 for Tie/None.
    pub margin: u64,
}

impl Outcome {
    #[inline]
    pub fn candidate_at(&self, index: usize) -> Candidate {
        self.id.candidate_at(index)
    }

    /// Region → candidate pairs in region order.
    pub fn assignment<'r>(
        &self,
        regions: &'r RegionSet,
    ) -> impl Iterator<Item = (&'r RegionId, Candidate)> + 'r {
        let id = self.id;
        regions
            .iter()
            .enumerate()
            .map(move |(i, r)| (&r.id, id.candidate_at(i)))
    }

    /// Candidate for the named region, if that region exists in `regions`.
    pub fn candidate_for(&self, regions: &RegionSet, name: &str) -> Option<Candidate> {
        regions.index_of(name).map(|i| self.id.candidate_at(i))
    }
}
