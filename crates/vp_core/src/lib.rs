//! vp_core: Core types for the victory-path engine.
//!
//! This crate is **I/O-free**. It defines the stable types shared by
//! `vp_algo`, `vp_io`, `vp_pipeline`, `vp_report` and `vp_cli`:
//!
//! - Region tokens: `RegionId`
//! - Entities: `Region`, `RegionSet`, `Candidate`, `Winner`, `OutcomeId`, `Outcome`
//! - Variables: `Params` (base totals, threshold, tie value), `FilterClass`
//! - Integer-first one-decimal percentages (`Percent1dp`)
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod entities;
pub mod ids;
pub mod rounding;
pub mod variables;

pub mod errors {
    use thiserror::Error;

    /// Configuration-class failures. These are detected while a region set or
    /// parameter block is assembled and must halt startup.
    #[derive(Clone, Debug, Eq, PartialEq, Error)]
    pub enum CoreError {
        #[error("invalid region id: {0:?}")]
        InvalidRegionId(String),
        #[error("duplicate region: {0}")]
        DuplicateRegion(String),
        #[error("too many regions: {got} (max {max})")]
        TooManyRegions { got: usize, max: usize },
        #[error("domain out of range: {0}")]
        DomainOutOfRange(&'static str),
        #[error("invalid token: {0:?}")]
        InvalidToken(String),
    }
}

pub use entities::{Candidate, Outcome, OutcomeId, Region, RegionSet, Winner, MAX_REGIONS};
pub use errors::CoreError;
pub use ids::RegionId;
pub use rounding::Percent1dp;
pub use variables::{CandidateSpec, FilterClass, Params};
