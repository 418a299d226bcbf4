//! Enumerator: every assignment of N binary-outcome regions, scored once.
//!
//! Contract:
//! - Outcomes are produced in ascending id order, `0..2^N`.
//! - Bit *i* of the id set means region *i* goes to candidate A.
//! - `total_a + total_b == base_a + base_b + Σ weights` for every outcome.
//! - The winner rule checks A-threshold, then B-threshold, then the exact tie,
//!   in that order; the order is part of the contract.
//!
//! Configuration errors (duplicates, oversize sets) are rejected by
//! `RegionSet::new`; enumeration itself cannot fail.

use vp_core::{Outcome, OutcomeId, Params, RegionSet, Winner};

/// Classify a pair of totals. The order of checks is fixed.
#[inline]
pub fn decide_winner(total_a: u64, total_b: u64, threshold: u64, tie_value: u64) -> Winner {
    if total_a >= threshold {
        Winner::A
    } else if total_b >= threshold {
        Winner::B
    } else if total_a == tie_value && total_b == tie_value {
        Winner::Tie
    } else {
        Winner::None
    }
}

/// Distance of the winning total above the threshold; 0 for Tie/None.
#[inline]
pub fn margin_for(winner: Winner, total_a: u64, total_b: u64, threshold: u64) -> u64 {
    match winner {
        Winner::A => total_a - threshold,
        Winner::B => total_b - threshold,
        Winner::Tie | Winner::None => 0,
    }
}

/// Generate the full universe for `regions`, ascending by id.
pub fn generate_universe(
    regions: &RegionSet,
    base_a: u64,
    base_b: u64,
    threshold: u64,
    tie_value: u64,
) -> Vec<Outcome> {
    let count = regions.outcome_count();
    let mut out: Vec<Outcome> = Vec::with_capacity(count as usize);

    for raw in 0..count {
        let id = OutcomeId(raw);
        let mut total_a = base_a;
        let mut total_b = base_b;

        for (i, region) in regions.iter().enumerate() {
            if raw & (1u32 << i) != 0 {
                total_a += u64::from(region.weight);
            } else {
                total_b += u64::from(region.weight);
            }
        }

        let winner = decide_winner(total_a, total_b, threshold, tie_value);
        let margin = margin_for(winner, total_a, total_b, threshold);
        out.push(Outcome { id, total_a, total_b, winner, margin });
    }

    out
}

/// Owner of the immutable universe together with the configuration that produced it.
///
/// Built once per configuration; share it by reference or `Arc` afterwards.
#[derive(Debug, Clone)]
pub struct Universe {
    regions: RegionSet,
    params: Params,
    outcomes: Vec<Outcome>,
}

impl Universe {
    pub fn build(regions: RegionSet, params: Params) -> Universe {
        let outcomes = generate_universe(
            &regions,
            params.candidate_a.base,
            params.candidate_b.base,
            params.threshold,
            params.tie_value,
        );
        let u = Universe { regions, params, outcomes };
        tracing::info!(
            regions = u.regions.len(),
            outcomes = u.outcomes.len(),
            threshold = u.params.threshold,
            pool = u.conserved_total(),
            "universe generated"
        );
        u
    }

    #[inline]
    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[inline]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Outcome by id (ids are dense, so this is an index).
    pub fn get(&self, id: OutcomeId) -> Option<&Outcome> {
        self.outcomes.get(id.as_u32() as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// `base_a + base_b + Σ weights`; every outcome's totals sum to this.
    pub fn conserved_total(&self) -> u64 {
        self.params.candidate_a.base + self.params.candidate_b.base + self.regions.total_weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vp_core::{Candidate, Region, RegionId};

    fn set(pairs: &[(&str, u32)]) -> RegionSet {
        RegionSet::new(
            pairs
                .iter()
                .map(|(n, w)| Region::new(n.parse::<RegionId>().unwrap(), *w))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn two_region_reference_scenario() {
        let regions = set(&[("X", 11), ("Y", 16)]);
        let u = generate_universe(&regions, 212, 179, 270, 269);
        let totals: Vec<(u32, u64, u64)> = u.iter().map(|o| (o.id.0, o.total_a, o.total_b)).collect();
        assert_eq!(totals, vec![(0, 212, 206), (1, 223, 195), (2, 228, 190), (3, 239, 179)]);
        assert!(u.iter().all(|o| o.winner == Winner::None && o.margin == 0));
        assert_eq!(u[1].candidate_at(0), Candidate::A);
        assert_eq!(u[1].candidate_at(1), Candidate::B);
    }

    #[test]
    fn empty_region_set_yields_base_totals_only() {
        let u = generate_universe(&RegionSet::default(), 212, 179, 270, 269);
        assert_eq!(u.len(), 1);
        assert_eq!((u[0].id, u[0].total_a, u[0].total_b), (OutcomeId(0), 212, 179));
    }

    #[test]
    fn zero_weights_are_not_special() {
        let regions = set(&[("Z", 0), ("Y", 3)]);
        let u = generate_universe(&regions, 0, 0, 3, 99);
        assert_eq!(u.len(), 4);
        assert_eq!(u[1].total_a, 0);
        assert_eq!(u[2].winner, Winner::A);
        assert_eq!(u[0].winner, Winner::B);
    }

    #[test]
    fn winner_rule_order_and_margin() {
        assert_eq!(decide_winner(270, 268, 270, 269), Winner::A);
        assert_eq!(decide_winner(268, 270, 270, 269), Winner::B);
        assert_eq!(decide_winner(269, 269, 270, 269), Winner::Tie);
        assert_eq!(decide_winner(269, 268, 270, 269), Winner::None);
        // A is checked first even if both would qualify under an odd configuration.
        assert_eq!(decide_winner(300, 300, 270, 269), Winner::A);
        assert_eq!(margin_for(Winner::A, 281, 257, 270), 11);
        assert_eq!(margin_for(Winner::B, 257, 281, 270), 11);
        assert_eq!(margin_for(Winner::Tie, 269, 269, 270), 0);
    }

    #[test]
    fn reference_battleground_has_ties_and_wins() {
        let regions = set(&[
            ("Arizona", 11), ("Georgia", 16), ("Michigan", 15), ("North Carolina", 16),
            ("Nevada", 6), ("Pennsylvania", 19), ("Wisconsin", 10), ("Texas", 40),
            ("Virginia", 13), ("NE-02", 1),
        ]);
        let u = Universe::build(regions, Params::default());
        assert_eq!(u.len(), 1024);
        assert_eq!(u.conserved_total(), 538);
        // Everything to A: 212 + 147 = 359.
        let all_a = u.get(OutcomeId(1023)).unwrap();
        assert_eq!((all_a.total_a, all_a.winner, all_a.margin), (359, Winner::A, 89));
        // Everything to B: 179 + 147 = 326.
        let all_b = u.get(OutcomeId(0)).unwrap();
        assert_eq!((all_b.total_b, all_b.winner, all_b.margin), (326, Winner::B, 56));
        assert!(u.outcomes().iter().any(|o| o.winner == Winner::Tie));
    }

    fn arb_weights() -> impl Strategy<Value = Vec<u32>> {
        prop::collection::vec(0u32..60, 0..=10)
    }

    proptest! {
        #[test]
        fn universe_shape_and_conservation(weights in arb_weights(), base_a in 0u64..300, base_b in 0u64..300) {
            let regions = RegionSet::new(
                weights.iter().enumerate()
                    .map(|(i, w)| Region::new(format!("R{i}").parse().unwrap(), *w))
                    .collect(),
            ).unwrap();
            let expected_total = base_a + base_b + regions.total_weight();
            let u = generate_universe(&regions, base_a, base_b, 270, 269);

            prop_assert_eq!(u.len(), 1usize << weights.len());
            for (i, o) in u.iter().enumerate() {
                prop_assert_eq!(o.id.0 as usize, i);
                prop_assert_eq!(o.total_a + o.total_b, expected_total);
                prop_assert_eq!(o.winner, decide_winner(o.total_a, o.total_b, 270, 269));
                match o.winner {
                    Winner::A => prop_assert!(o.total_a >= 270),
                    Winner::B => prop_assert!(o.total_a < 270 && o.total_b >= 270),
                    Winner::Tie => prop_assert!(o.total_a == 269 && o.total_b == 269),
                    Winner::None => prop_assert_eq!(o.margin, 0),
                }
            }
        }
    }
}
