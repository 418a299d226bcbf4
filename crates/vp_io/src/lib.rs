//! crates/vp_io/src/lib.rs
//! Scenario I/O for the victory-path engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Strict offline posture: local files only, bounded reads.
//! - Details live in submodules; the public surface is re-exported below.

#![forbid(unsafe_code)]

use thiserror::Error;
use vp_core::CoreError;

pub mod atomic_write;
pub mod canonical_json;
pub mod hasher;
pub mod loader;

/// Unified error for vp_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// Paths with a scheme (`http://`, `file://`, ...) are refused.
    #[error("path must be a local file (no scheme): {0}")]
    NonLocal(String),

    /// Input larger than the configured read limit.
    #[error("input exceeds {limit} bytes: {path}")]
    TooLarge { path: String, limit: u64 },

    /// JSON deserialization errors with a location hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Core domain violations (duplicate regions, oversize sets, bad tokens).
    #[error("invalid scenario: {0}")]
    Core(#[from] CoreError),

    /// Scenario-level invariants not expressible in core types.
    #[error("invalid scenario: {0}")]
    Invalid(String),

    /// Hashing / canonicalization failures.
    #[error("hash error: {0}")]
    Hash(#[from] hasher::HashError),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column rather than a pointer; surface those.
        IoError::Json {
            pointer: format!("line {} column {}", e.line(), e.column()),
            msg: e.to_string(),
        }
    }
}

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub use atomic_write::write_atomic;
pub use loader::{builtin_scenario, load_scenario, parse_scenario, Preset, Scenario};
