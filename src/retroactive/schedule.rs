//! Yearly difference schedule fed to the retroactive aggregator

use serde::{Deserialize, Serialize};

use crate::benefit::BenefitEvolutionRow;
use crate::error::AuditError;

/// Per-year correction and interest inputs
///
/// Externally supplied amounts (court tables in the reference case), not the
/// output of a general index-compounding algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyAdjustment {
    pub year: i32,

    /// Months of the year the shortfall accrued (1..=12; partial final year)
    pub months_in_year: u32,

    /// Monetary correction owed for the year, in currency units
    pub monetary_correction: f64,

    /// Legal interest owed for the year, in currency units
    pub legal_interest: f64,
}

/// One year of the aggregator's input schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyScheduleRow {
    pub year: i32,
    pub monthly_difference: f64,
    pub months_in_year: u32,
    pub monetary_correction: f64,
    pub legal_interest: f64,
}

/// Join evolution rows with per-year adjustments into an aggregator schedule.
///
/// The monthly difference for each year is the evolution shortfall
/// (recalculated minus official). Every evolution year must have a matching
/// adjustment entry.
pub fn build_schedule(
    evolution: &[BenefitEvolutionRow],
    adjustments: &[YearlyAdjustment],
) -> Result<Vec<YearlyScheduleRow>, AuditError> {
    evolution
        .iter()
        .map(|row| {
            let adjustment = adjustments
                .iter()
                .find(|a| a.year == row.year)
                .ok_or_else(|| {
                    AuditError::InvalidInput(format!("no adjustment entry for year {}", row.year))
                })?;
            Ok(YearlyScheduleRow {
                year: row.year,
                monthly_difference: row.monthly_shortfall(),
                months_in_year: adjustment.months_in_year,
                monetary_correction: adjustment.monetary_correction,
                legal_interest: adjustment.legal_interest,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn evolution_row(year: i32, official: f64, recalculated: f64) -> BenefitEvolutionRow {
        BenefitEvolutionRow {
            year,
            official,
            recalculated,
            adjustment_pct: 0.0,
            reference_index_pct: 0.0,
        }
    }

    #[test]
    fn test_build_schedule_derives_shortfall() {
        let evolution = vec![
            evolution_row(2015, 3934.84, 4590.33),
            evolution_row(2016, 4378.29, 5108.09),
        ];
        let adjustments = vec![
            YearlyAdjustment { year: 2015, months_in_year: 12, monetary_correction: 655.49, legal_interest: 0.0 },
            YearlyAdjustment { year: 2016, months_in_year: 12, monetary_correction: 729.80, legal_interest: 0.0 },
        ];

        let schedule = build_schedule(&evolution, &adjustments).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_abs_diff_eq!(schedule[0].monthly_difference, 655.49, epsilon = 1e-9);
        assert_abs_diff_eq!(schedule[1].monthly_difference, 729.80, epsilon = 1e-9);
        assert_eq!(schedule[0].months_in_year, 12);
    }

    #[test]
    fn test_missing_adjustment_year() {
        let evolution = vec![evolution_row(2015, 3934.84, 4590.33)];
        let err = build_schedule(&evolution, &[]).unwrap_err();
        assert!(matches!(err, AuditError::InvalidInput(_)));
    }
}
