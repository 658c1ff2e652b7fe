//! Benefit salary ("salário de benefício") derivation

use serde::Serialize;

/// Benefit salary: averaged wage-indexed contributions times the pension
/// factor.
pub fn benefit_salary(average: f64, factor: f64) -> f64 {
    average * factor
}

/// Per-track computation summary
///
/// One of these is produced for each benefit track (official and
/// recalculated). The two tracks are fully independent: different record
/// sets, different factor inputs, no shared intermediate state.
#[derive(Debug, Clone, Serialize)]
pub struct ComparativeResult {
    /// Records analyzed in the track's input set
    pub total_contributions: usize,

    /// Records inside the 80% averaging window
    pub considered_contributions: usize,

    /// Mean of the considered corrected values
    pub average_salary: f64,

    /// Pension factor applied to the average
    pub pension_factor: f64,

    /// `average_salary * pension_factor`
    pub benefit_salary: f64,
}
