//! Integer-first one-decimal percentages.
//!
//! - Pure integer math; no floats until the caller asks for one.
//! - Rounding is half-up on tenths of a percent.
//! - A zero denominator yields 0.0%, never an error.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Percentage held as tenths of a percent (`333` means 33.3%).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent1dp(u32);

impl Percent1dp {
    pub const ZERO: Percent1dp = Percent1dp(0);

    /// `100 * num / den` rounded half-up to one decimal; `den == 0` gives zero.
    pub fn of(num: u64, den: u64) -> Percent1dp {
        Percent1dp(percent_one_decimal_tenths(num, den))
    }

    #[inline]
    pub fn tenths(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Percent1dp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Percent1dp {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.as_f64())
    }
}

/// Tenths of a percent of `num / den`, rounded half-up. Returns 0 when `den == 0`.
pub fn percent_one_decimal_tenths(num: u64, den: u64) -> u32 {
    if den == 0 {
        return 0;
    }
    let n = u128::from(num) * 1000;
    let d = u128::from(den);
    let tenths = (2 * n + d) / (2 * d);
    u32::try_from(tenths).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_denominator_is_zero() {
        assert_eq!(Percent1dp::of(5, 0), Percent1dp::ZERO);
        assert_eq!(Percent1dp::of(0, 0).to_string(), "0.0");
    }

    #[test]
    fn rounds_half_up_on_tenths() {
        assert_eq!(percent_one_decimal_tenths(1, 3), 333);
        assert_eq!(percent_one_decimal_tenths(2, 3), 667);
        assert_eq!(percent_one_decimal_tenths(1, 8), 125);
        // 1/16 = 6.25% -> 6.3
        assert_eq!(percent_one_decimal_tenths(1, 16), 63);
        assert_eq!(percent_one_decimal_tenths(7, 7), 1000);
    }

    #[test]
    fn display_and_float() {
        let p = Percent1dp::of(2, 3);
        assert_eq!(p.to_string(), "66.7");
        assert!((p.as_f64() - 66.7).abs() < 1e-9);
        assert_eq!(Percent1dp::of(1, 1).to_string(), "100.0");
    }
}
