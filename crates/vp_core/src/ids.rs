//! crates/vp_core/src/ids.rs
//! Region identifiers. Human-readable names ("North Carolina", "NE-02"),
//! validated once at construction; no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const REGION_MAX_LEN: usize = 64;

/// Region names: 1..=64 bytes, no control characters, no surrounding whitespace.
#[inline]
pub fn is_valid_region_name(s: &str) -> bool {
    if s.is_empty() || s.len() > REGION_MAX_LEN {
        return false;
    }
    if s.trim() != s {
        return false;
    }
    !s.chars().any(char::is_control)
}

/// Name of a contested region. Equality is exact (case-sensitive).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct RegionId(String);

impl RegionId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegionId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_region_name(s) {
            Ok(RegionId(s.to_owned()))
        } else {
            Err(CoreError::InvalidRegionId(s.to_owned()))
        }
    }
}

impl TryFrom<&str> for RegionId {
    type Error = CoreError;
    #[inline]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for RegionId {
    type Error = CoreError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_region_name(&value) {
            Ok(RegionId(value))
        } else {
            Err(CoreError::InvalidRegionId(value))
        }
    }
}

impl From<RegionId> for String {
    fn from(id: RegionId) -> Self {
        id.0
    }
}

impl AsRef<str> for RegionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
