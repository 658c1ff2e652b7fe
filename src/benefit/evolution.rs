//! Yearly benefit evolution under both tracks
//!
//! One row per calendar year with the benefit value as granted and as
//! recalculated, plus the adjustment indices applied that year. The yearly
//! monthly difference fed to the retroactive aggregator is exactly the
//! shortfall between the two columns.

use serde::{Deserialize, Serialize};

/// Benefit values for one calendar year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitEvolutionRow {
    pub year: i32,

    /// Monthly benefit as paid under the official calculation
    pub official: f64,

    /// Monthly benefit under the recalculated entitlement
    pub recalculated: f64,

    /// Statutory benefit adjustment applied that year (%)
    pub adjustment_pct: f64,

    /// Reference inflation index for the same year (%), for comparison
    pub reference_index_pct: f64,
}

impl BenefitEvolutionRow {
    /// Monthly amount the beneficiary was underpaid in this year
    pub fn monthly_shortfall(&self) -> f64 {
        self.recalculated - self.official
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_monthly_shortfall() {
        let row = BenefitEvolutionRow {
            year: 2015,
            official: 3934.84,
            recalculated: 4590.33,
            adjustment_pct: 6.23,
            reference_index_pct: 8.19,
        };
        assert_abs_diff_eq!(row.monthly_shortfall(), 655.49, epsilon = 1e-9);
    }
}
