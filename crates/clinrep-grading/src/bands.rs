//! Closed-interval band tables.

use tracing::trace;

/// Inclusive interval `lower..=upper` mapped to a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band<L: 'static> {
    pub lower: u32,
    pub upper: u32,
    pub label: L,
}

impl<L: 'static> Band<L> {
    pub const fn new(lower: u32, upper: u32, label: L) -> Self {
        Self {
            lower,
            upper,
            label,
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Ordered bands plus the labels used for values outside all of them.
#[derive(Debug, Clone, Copy)]
pub struct BandTable<L: 'static> {
    /// Table identifier for logs.
    pub name: &'static str,
    pub bands: &'static [Band<L>],
    /// Label for values below the lowest band.
    pub below_range: L,
    /// Label for values above the lowest band not covered by any band.
    pub above_range: L,
}

/// Map `value` to the label of the first band containing it.
pub fn classify<L: Copy + 'static>(value: u32, table: &BandTable<L>) -> L {
    if let Some(band) = table.bands.iter().find(|band| band.contains(value)) {
        return band.label;
    }
    let lowest = table.bands.iter().map(|band| band.lower).min();
    let above = lowest.is_some_and(|lower| value >= lower);
    trace!(table = table.name, value, above, "value outside all bands");
    if above {
        table.above_range
    } else {
        table.below_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: BandTable<&str> = BandTable {
        name: "sample",
        bands: &[Band::new(1, 4, "low"), Band::new(5, 9, "high")],
        below_range: "below",
        above_range: "above",
    };

    #[test]
    fn picks_band_and_fallbacks() {
        assert_eq!(classify(0, &SAMPLE), "below");
        assert_eq!(classify(1, &SAMPLE), "low");
        assert_eq!(classify(4, &SAMPLE), "low");
        assert_eq!(classify(5, &SAMPLE), "high");
        assert_eq!(classify(9, &SAMPLE), "high");
        assert_eq!(classify(10, &SAMPLE), "above");
    }

    #[test]
    fn empty_table_falls_back_below() {
        const EMPTY: BandTable<&str> = BandTable {
            name: "empty",
            bands: &[],
            below_range: "below",
            above_range: "above",
        };
        assert_eq!(classify(7, &EMPTY), "below");
    }
}
