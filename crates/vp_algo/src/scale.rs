//! Margin color scale for a filtered view.
//!
//! Intensity is linear in `margin / max`, where `max` is the largest margin in
//! the view. An empty view or an all-zero view uses `max = 1`.

use vp_core::Outcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarginScale {
    max: u64,
}

impl Default for MarginScale {
    fn default() -> Self {
        MarginScale { max: 1 }
    }
}

impl MarginScale {
    pub fn from_outcomes<'a, I>(outcomes: I) -> MarginScale
    where
        I: IntoIterator<Item = &'a Outcome>,
    {
        let max = outcomes.into_iter().map(|o| o.margin).max().unwrap_or(0);
        MarginScale { max: max.max(1) }
    }

    #[inline]
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Green channel in `0..=255`, `floor(255 * margin / max)`; saturates above `max`.
    pub fn green(&self, margin: u64) -> u8 {
        let m = u128::from(margin.min(self.max));
        let g = 255 * m / u128::from(self.max);
        u8::try_from(g).unwrap_or(u8::MAX)
    }

    /// `(r, g, b)` for the margin cell: black through pure green.
    pub fn rgb(&self, margin: u64) -> (u8, u8, u8) {
        (0, self.green(margin), 0)
    }
}
