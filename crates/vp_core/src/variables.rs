//! variables.rs: scenario parameters and the outcome filter domain.
//! Defaults reproduce the reference configuration (270 to win, 269-269 tie).

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::{Candidate, Winner};
use crate::errors::CoreError;

/// Define an enum with explicit wire tokens, `as_token`, and `FromStr`.
macro_rules! wire_enum {
    ($(#[$m:meta])* $name:ident => { $($variant:ident = $token:literal),+ $(,)? }) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $token))]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_token(self) -> &'static str {
                match self { $($name::$variant => $token,)+ }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_token())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let t = s.trim().to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_token() == t)
                    .ok_or_else(|| CoreError::InvalidToken(s.to_owned()))
            }
        }
    };
}

wire_enum!(
    /// Outcome-class filter applied after constraint filtering.
    FilterClass => {
        All  = "all",
        A    = "a",
        B    = "b",
        Tie  = "tie",
        None = "none",
    }
);

impl Default for FilterClass {
    fn default() -> Self {
        FilterClass::All
    }
}

impl FilterClass {
    /// True iff an outcome with this `winner` is retained.
    #[inline]
    pub fn admits(self, winner: Winner) -> bool {
        match self {
            FilterClass::All => true,
            FilterClass::A => winner == Winner::A,
            FilterClass::B => winner == Winner::B,
            FilterClass::Tie => winner == Winner::Tie,
            FilterClass::None => winner == Winner::None,
        }
    }
}

/// Display label and base total for one side.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateSpec {
    pub label: String,
    pub base: u64,
}

/// Fixed scenario constants. Supplied once at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Params {
    pub candidate_a: CandidateSpec,
    pub candidate_b: CandidateSpec,
    /// Total at or above which a side wins outright.
    pub threshold: u64,
    /// Both totals equal to this value is a tie.
    pub tie_value: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            candidate_a: CandidateSpec { label: "Harris".into(), base: 212 },
            candidate_b: CandidateSpec { label: "Trump".into(), base: 179 },
            threshold: 270,
            tie_value: 269,
        }
    }
}

impl Params {
    pub fn spec(&self, c: Candidate) -> &CandidateSpec {
        match c {
            Candidate::A => &self.candidate_a,
            Candidate::B => &self.candidate_b,
        }
    }

    pub fn label(&self, c: Candidate) -> &str {
        &self.spec(c).label
    }

    /// Human label for a winner class (empty for no winner).
    pub fn winner_label(&self, w: Winner) -> &str {
        match w {
            Winner::A => self.label(Candidate::A),
            Winner::B => self.label(Candidate::B),
            Winner::Tie => "Tie",
            Winner::None => "",
        }
    }

    /// Validate domains that serde cannot express.
    pub fn validate_domains(&self) -> Result<(), CoreError> {
        if self.threshold == 0 {
            return Err(CoreError::DomainOutOfRange("threshold must be > 0"));
        }
        if self.candidate_a.label.trim().is_empty() || self.candidate_b.label.trim().is_empty() {
            return Err(CoreError::DomainOutOfRange("candidate labels must be non-empty"));
        }
        if self.candidate_a.label == self.candidate_b.label {
            return Err(CoreError::DomainOutOfRange("candidate labels must differ"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_tokens_round_trip() {
        for f in FilterClass::ALL {
            assert_eq!(f.as_token().parse::<FilterClass>().unwrap(), *f);
        }
        assert_eq!("TIE".parse::<FilterClass>().unwrap(), FilterClass::Tie);
        assert!("harris".parse::<FilterClass>().is_err());
    }

    #[test]
    fn filter_admits_only_its_class() {
        assert!(FilterClass::All.admits(Winner::None));
        assert!(FilterClass::A.admits(Winner::A));
        assert!(!FilterClass::A.admits(Winner::B));
        assert!(FilterClass::None.admits(Winner::None));
        assert!(!FilterClass::Tie.admits(Winner::None));
    }

    #[test]
    fn default_params_are_reference_domain() {
        let p = Params::default();
        assert_eq!((p.candidate_a.base, p.candidate_b.base), (212, 179));
        assert_eq!((p.threshold, p.tie_value), (270, 269));
        assert_eq!(p.winner_label(Winner::B), "Trump");
        assert_eq!(p.winner_label(Winner::None), "");
        assert!(p.validate_domains().is_ok());
    }

    #[test]
    fn zero_threshold_rejected() {
        let p = Params { threshold: 0, ..Params::default() };
        assert!(p.validate_domains().is_err());
    }
}
