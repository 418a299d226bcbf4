//! Filter & Aggregator.
//!
//! Stage 1 keeps outcomes that agree with every pinned region; stage 2 keeps
//! outcomes whose winner matches the outcome filter. Both stages are stable
//! (ascending id order is preserved).
//!
//! Aggregation counts A, B and Tie paths. `None` outcomes are excluded from
//! the counted classes *and* from `total`, so percentages are over decided
//! paths only.

use std::collections::BTreeMap;

use thiserror::Error;
use vp_core::{Candidate, FilterClass, Outcome, Percent1dp, RegionId, RegionSet, Winner};

use crate::enumerate::Universe;
use crate::scale::MarginScale;

/// Region → pinned candidate. At most one entry per region by construction.
pub type Constraints = BTreeMap<RegionId, Candidate>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A constraint names a region that is not part of the configured set.
    #[error("unknown region in constraints: {0}")]
    UnknownRegion(String),
}

/// Constraints compiled against a region order: an outcome passes iff
/// `id & mask == want`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinMask {
    pub mask: u32,
    pub want: u32,
}

impl PinMask {
    pub fn compile(regions: &RegionSet, constraints: &Constraints) -> Result<PinMask, FilterError> {
        let mut pm = PinMask::default();
        for (region, candidate) in constraints {
            let idx = regions
                .index_of(region.as_str())
                .ok_or_else(|| FilterError::UnknownRegion(region.to_string()))?;
            let bit = 1u32 << idx;
            pm.mask |= bit;
            if *candidate == Candidate::A {
                pm.want |= bit;
            }
        }
        Ok(pm)
    }

    #[inline]
    pub fn admits(self, outcome: &Outcome) -> bool {
        outcome.id.as_u32() & self.mask == self.want
    }
}

/// Per-class path counts over a filtered view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stats {
    pub count_a: u64,
    pub count_b: u64,
    pub count_tie: u64,
    /// `count_a + count_b + count_tie`.
    pub total: u64,
    pub pct_a: Percent1dp,
    pub pct_b: Percent1dp,
    pub pct_tie: Percent1dp,
}

impl Stats {
    pub fn count(&self, w: Winner) -> u64 {
        match w {
            Winner::A => self.count_a,
            Winner::B => self.count_b,
            Winner::Tie => self.count_tie,
            Winner::None => 0,
        }
    }
}

/// Count paths per class and derive one-decimal percentages.
pub fn aggregate<'a, I>(outcomes: I) -> Stats
where
    I: IntoIterator<Item = &'a Outcome>,
{
    let (mut a, mut b, mut tie) = (0u64, 0u64, 0u64);
    for o in outcomes {
        match o.winner {
            Winner::A => a += 1,
            Winner::B => b += 1,
            Winner::Tie => tie += 1,
            Winner::None => {}
        }
    }
    let total = a + b + tie;
    Stats {
        count_a: a,
        count_b: b,
        count_tie: tie,
        total,
        pct_a: Percent1dp::of(a, total),
        pct_b: Percent1dp::of(b, total),
        pct_tie: Percent1dp::of(tie, total),
    }
}

/// Filtered outcomes (borrowed from the universe, ascending id) plus aggregates.
#[derive(Clone, Debug)]
pub struct FilteredView<'u> {
    pub outcomes: Vec<&'u Outcome>,
    pub stats: Stats,
    pub scale: MarginScale,
}

impl<'u> FilteredView<'u> {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Derive the view for `constraints` and `outcome_filter`. Pure; safe to call on every event.
pub fn filter_and_aggregate<'u>(
    universe: &'u Universe,
    constraints: &Constraints,
    outcome_filter: FilterClass,
) -> Result<FilteredView<'u>, FilterError> {
    let pins = PinMask::compile(universe.regions(), constraints)?;

    let outcomes: Vec<&'u Outcome> = universe
        .outcomes()
        .iter()
        .filter(|o| pins.admits(o))
        .filter(|o| outcome_filter.admits(o.winner))
        .collect();

    let stats = aggregate(outcomes.iter().copied());
    let scale = MarginScale::from_outcomes(outcomes.iter().copied());

    tracing::debug!(
        pinned = constraints.len(),
        filter = %outcome_filter,
        matched = outcomes.len(),
        paths = stats.total,
        "view derived"
    );

    Ok(FilteredView { outcomes, stats, scale })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vp_core::{OutcomeId, Params, Region};

    fn rid(s: &str) -> RegionId {
        s.parse().unwrap()
    }

    fn universe(pairs: &[(&str, u32)], params: Params) -> Universe {
        let set = RegionSet::new(pairs.iter().map(|(n, w)| Region::new(rid(n), *w)).collect()).unwrap();
        Universe::build(set, params)
    }

    fn ids(v: &FilteredView<'_>) -> Vec<u32> {
        v.outcomes.iter().map(|o| o.id.0).collect()
    }

    #[test]
    fn empty_constraints_and_all_return_full_universe() {
        let u = universe(&[("X", 11), ("Y", 16), ("Z", 5)], Params::default());
        let v = filter_and_aggregate(&u, &Constraints::new(), FilterClass::All).unwrap();
        assert_eq!(v.len(), u.len());
        assert!(v.outcomes.iter().zip(u.outcomes()).all(|(a, b)| *a == b));
    }

    #[test]
    fn pin_x_to_a_keeps_ids_1_and_3() {
        let u = universe(&[("X", 11), ("Y", 16)], Params::default());
        let mut c = Constraints::new();
        c.insert(rid("X"), Candidate::A);
        let v = filter_and_aggregate(&u, &c, FilterClass::All).unwrap();
        assert_eq!(ids(&v), vec![1, 3]);
    }

    #[test]
    fn filter_a_on_reference_pair_is_empty_with_zero_stats() {
        let u = universe(&[("X", 11), ("Y", 16)], Params::default());
        let v = filter_and_aggregate(&u, &Constraints::new(), FilterClass::A).unwrap();
        assert!(v.is_empty());
        assert_eq!(v.stats, Stats::default());
        assert_eq!(v.stats.pct_a, Percent1dp::ZERO);
        assert_eq!(v.scale.max(), 1);
    }

    #[test]
    fn none_outcomes_do_not_count_toward_total() {
        let u = universe(&[("X", 11), ("Y", 16)], Params::default());
        let v = filter_and_aggregate(&u, &Constraints::new(), FilterClass::None).unwrap();
        assert_eq!(v.len(), 4);
        assert_eq!(v.stats.total, 0);
    }

    #[test]
    fn pinning_every_region_leaves_one_outcome() {
        let u = universe(&[("X", 11), ("Y", 16), ("Z", 40)], Params::default());
        let mut c = Constraints::new();
        c.insert(rid("X"), Candidate::B);
        c.insert(rid("Y"), Candidate::A);
        c.insert(rid("Z"), Candidate::A);
        let v = filter_and_aggregate(&u, &c, FilterClass::All).unwrap();
        assert_eq!(ids(&v), vec![OutcomeId::from_assignment(&[Candidate::B, Candidate::A, Candidate::A]).0]);
    }

    #[test]
    fn unknown_region_is_rejected() {
        let u = universe(&[("X", 11)], Params::default());
        let mut c = Constraints::new();
        c.insert(rid("Ohio"), Candidate::A);
        assert_eq!(
            filter_and_aggregate(&u, &c, FilterClass::All).unwrap_err(),
            FilterError::UnknownRegion("Ohio".into())
        );
    }

    #[test]
    fn stats_over_mixed_winners() {
        // Pool of 538 split so that A wins with every region, ties with three of four extra.
        let params = Params {
            candidate_a: vp_core::CandidateSpec { label: "A".into(), base: 266 },
            candidate_b: vp_core::CandidateSpec { label: "B".into(), base: 268 },
            threshold: 270,
            tie_value: 269,
        };
        let u = universe(&[("X", 1), ("Y", 1), ("Z", 2)], params);
        let v = filter_and_aggregate(&u, &Constraints::new(), FilterClass::All).unwrap();
        let s = v.stats;
        assert_eq!(s.total, s.count_a + s.count_b + s.count_tie);
        assert_eq!(s.count(Winner::A) + s.count(Winner::B) + s.count(Winner::Tie), s.total);
        // A needs all 4 extra (id 7); exactly 3 extra is 269-269; B takes the rest.
        assert_eq!(s.count_a, 1);
        assert_eq!(s.count_tie, 2);
        assert_eq!(s.count_b, 5);
        assert_eq!(s.pct_a.to_string(), "12.5");
        assert_eq!(s.pct_tie.to_string(), "25.0");
        assert_eq!(s.pct_b.to_string(), "62.5");
    }

    proptest! {
        #[test]
        fn percentages_sum_to_100_within_a_tenth(
            weights in prop::collection::vec(0u32..25, 1..=8),
            base_a in 180u64..280,
            base_b in 180u64..280,
            pin_bits in any::<u8>(),
            pin_vals in any::<u8>(),
        ) {
            let set = RegionSet::new(
                weights.iter().enumerate()
                    .map(|(i, w)| Region::new(format!("R{i}").parse().unwrap(), *w))
                    .collect(),
            ).unwrap();
            let params = Params {
                candidate_a: vp_core::CandidateSpec { label: "A".into(), base: base_a },
                candidate_b: vp_core::CandidateSpec { label: "B".into(), base: base_b },
                threshold: 270,
                tie_value: 269,
            };
            let u = Universe::build(set, params);
            let mut c = Constraints::new();
            for (i, r) in u.regions().iter().enumerate() {
                if pin_bits & (1 << i) != 0 {
                    let cand = if pin_vals & (1 << i) != 0 { Candidate::A } else { Candidate::B };
                    c.insert(r.id.clone(), cand);
                }
            }
            let v = filter_and_aggregate(&u, &c, FilterClass::All).unwrap();
            prop_assert_eq!(v.len(), u.len() >> c.len());
            prop_assert!(v.outcomes.windows(2).all(|w| w[0].id < w[1].id));
            let s = v.stats;
            let sum = s.pct_a.tenths() + s.pct_b.tenths() + s.pct_tie.tenths();
            if s.total > 0 {
                prop_assert!((999..=1001).contains(&sum), "sum of tenths = {}", sum);
            } else {
                prop_assert_eq!(sum, 0);
            }
        }
    }
}
