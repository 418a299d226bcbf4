// crates/vp_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure algorithms over a fixed region configuration:
//!
//! - `enumerate`: build the immutable universe of all 2^N outcomes once.
//! - `filter`: derive the constrained/filtered view and per-class path statistics.
//! - `scale`: margin intensity for the filtered view (division-safe).
//!
//! No I/O, no RNG, no hidden state. Every function here can be called from any
//! number of threads against a shared `Universe`.

pub mod enumerate;
pub mod filter;
pub mod scale;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use enumerate::{decide_winner, generate_universe, margin_for, Universe};
pub use filter::{aggregate, filter_and_aggregate, Constraints, FilterError, FilteredView, PinMask, Stats};
pub use scale::MarginScale;
