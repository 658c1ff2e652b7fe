//! Comparative audit pipeline
//!
//! Runs the official and recalculated benefit tracks independently and
//! bundles the comparison with the retroactive statement. The two tracks
//! never share intermediate state: each gets its own record set and factor
//! inputs, and every run constructs fresh outputs.

use serde::Serialize;

use crate::benefit::{benefit_salary, pension_factor, ComparativeResult, FactorInputs};
use crate::error::AuditError;
use crate::records::loader::LoadedCase;
use crate::records::{BeneficiarySnapshot, ContributionRecord};
use crate::retroactive::{
    aggregate, build_schedule, InstallmentPlan, RetroactiveStatement, YearlyScheduleRow,
};
use crate::selection::select_highest;

/// One benefit track's inputs: its record set and its factor parameters
#[derive(Debug, Clone)]
pub struct TrackInputs {
    pub records: Vec<ContributionRecord>,
    pub factor: FactorInputs,
}

/// A complete audit case
#[derive(Debug, Clone)]
pub struct AuditCase {
    pub beneficiary: BeneficiarySnapshot,
    pub official: TrackInputs,
    pub recalculated: TrackInputs,
    pub schedule: Vec<YearlyScheduleRow>,
}

impl AuditCase {
    /// Build a case from loaded fixture data
    pub fn from_loaded(loaded: &LoadedCase) -> Result<Self, AuditError> {
        let schedule = build_schedule(&loaded.evolution, &loaded.adjustments)?;
        Ok(Self {
            beneficiary: loaded.profile.beneficiary.clone(),
            official: TrackInputs {
                records: loaded.official_records(),
                factor: loaded.profile.official_factor,
            },
            recalculated: TrackInputs {
                records: loaded.recalculated_records(),
                factor: loaded.profile.recalculated_factor,
            },
            schedule,
        })
    }
}

/// Full audit output, serializable for any rendering target
#[derive(Debug, Clone, Serialize)]
pub struct AuditOutcome {
    pub beneficiary: BeneficiarySnapshot,

    pub official: ComparativeResult,
    pub recalculated: ComparativeResult,

    /// Considered records per track, descending by corrected value
    pub official_selected: Vec<ContributionRecord>,
    pub recalculated_selected: Vec<ContributionRecord>,

    /// Monthly underpayment: recalculated minus official benefit salary
    pub monthly_shortfall: f64,

    /// Shortfall as a percentage of the official benefit salary
    pub shortfall_pct: f64,

    /// Rejected periods ranked inside the recalculated track's averaging
    /// window (periods the audit flags as wrongly refused)
    pub reclaimable_periods: usize,

    pub statement: RetroactiveStatement,
}

/// Runs audit cases under a fixed installment plan
///
/// # Example
/// ```ignore
/// let engine = AuditEngine::default();
/// let outcome = engine.run_case(&case)?;
/// println!("owed: {:.2}", outcome.statement.owed.grand_total);
/// ```
#[derive(Debug, Clone)]
pub struct AuditEngine {
    plan: InstallmentPlan,
}

impl AuditEngine {
    /// Create an engine with a specific installment plan
    pub fn new(plan: InstallmentPlan) -> Self {
        Self { plan }
    }

    /// Get the configured installment plan
    pub fn plan(&self) -> &InstallmentPlan {
        &self.plan
    }

    /// Run the full comparative pipeline for one case
    pub fn run_case(&self, case: &AuditCase) -> Result<AuditOutcome, AuditError> {
        let official = run_track(&case.official)?;
        let recalculated = run_track(&case.recalculated)?;

        log::debug!(
            "tracks: official {:.2} ({} of {}), recalculated {:.2} ({} of {})",
            official.result.benefit_salary,
            official.result.considered_contributions,
            official.result.total_contributions,
            recalculated.result.benefit_salary,
            recalculated.result.considered_contributions,
            recalculated.result.total_contributions,
        );

        let monthly_shortfall = recalculated.result.benefit_salary - official.result.benefit_salary;
        let shortfall_pct = if official.result.benefit_salary.abs() > f64::EPSILON {
            monthly_shortfall / official.result.benefit_salary * 100.0
        } else {
            0.0
        };

        let statement = aggregate(&case.schedule, &self.plan)?;

        Ok(AuditOutcome {
            beneficiary: case.beneficiary.clone(),
            reclaimable_periods: recalculated.rejected_within_cut,
            official: official.result,
            recalculated: recalculated.result,
            official_selected: official.selected,
            recalculated_selected: recalculated.selected,
            monthly_shortfall,
            shortfall_pct,
            statement,
        })
    }
}

impl Default for AuditEngine {
    fn default() -> Self {
        Self::new(InstallmentPlan::default())
    }
}

struct TrackOutcome {
    result: ComparativeResult,
    selected: Vec<ContributionRecord>,
    rejected_within_cut: usize,
}

fn run_track(track: &TrackInputs) -> Result<TrackOutcome, AuditError> {
    let selection = select_highest(&track.records)?;
    let factor = pension_factor(&track.factor)?;
    let salary = benefit_salary(selection.average, factor);

    Ok(TrackOutcome {
        result: ComparativeResult {
            total_contributions: selection.total_count,
            considered_contributions: selection.considered_count,
            average_salary: selection.average,
            pension_factor: factor,
            benefit_salary: salary,
        },
        rejected_within_cut: selection.rejected_within_cut,
        selected: selection.selected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AdmissibilityStatus, Competence};
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn record(month: u32, corrected: f64, status: AdmissibilityStatus) -> ContributionRecord {
        ContributionRecord {
            competence: Competence::new(2014, month).unwrap(),
            nominal_salary: corrected,
            correction_index: 1.0,
            corrected_value: corrected,
            status,
        }
    }

    fn beneficiary() -> BeneficiarySnapshot {
        BeneficiarySnapshot {
            name: "TEST".to_string(),
            cpf: "000.000.000-00".to_string(),
            nit: "000.00000.00-0".to_string(),
            benefit_number: "0".to_string(),
            benefit_species: "42".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1954, 1, 11).unwrap(),
            requirement_date: NaiveDate::from_ymd_opt(2014, 12, 11).unwrap(),
            age_at_requirement: crate::records::ServiceTime { years: 60, months: 11, days: 0 },
            contribution_time: crate::records::ServiceTime { years: 38, months: 1, days: 25 },
        }
    }

    fn factor_inputs() -> FactorInputs {
        FactorInputs {
            contribution_time_years: 38.14,
            contribution_rate: 0.31,
            life_expectancy_years: 21.8,
            age_years: 60.92,
        }
    }

    fn test_case() -> AuditCase {
        // Official track: the 4 admitted records. Recalculated: all 5, one
        // rejected record carrying the highest corrected value.
        let accepted: Vec<_> = (1..=4)
            .map(|m| record(m, 1000.0 + m as f64 * 100.0, AdmissibilityStatus::Accepted))
            .collect();
        let mut all = accepted.clone();
        all.push(record(5, 2000.0, AdmissibilityStatus::Rejected));

        AuditCase {
            beneficiary: beneficiary(),
            official: TrackInputs { records: accepted, factor: factor_inputs() },
            recalculated: TrackInputs { records: all, factor: factor_inputs() },
            schedule: vec![YearlyScheduleRow {
                year: 2015,
                monthly_difference: 100.0,
                months_in_year: 12,
                monetary_correction: 50.0,
                legal_interest: 10.0,
            }],
        }
    }

    #[test]
    fn test_run_case_end_to_end() {
        let outcome = AuditEngine::default().run_case(&test_case()).unwrap();

        // official: 4 records -> window 3, mean of (1400, 1300, 1200)
        assert_eq!(outcome.official.considered_contributions, 3);
        assert_abs_diff_eq!(outcome.official.average_salary, 1300.0, epsilon = 1e-9);

        // recalculated: 5 records -> window 4, rejected 2000 leads it
        assert_eq!(outcome.recalculated.considered_contributions, 4);
        assert_abs_diff_eq!(outcome.recalculated.average_salary, 1475.0, epsilon = 1e-9);
        assert_eq!(outcome.recalculated_selected[0].corrected_value, 2000.0);
        assert_eq!(outcome.reclaimable_periods, 1);

        // same factor on a higher average: positive shortfall
        assert!(outcome.monthly_shortfall > 0.0);
        assert!(outcome.shortfall_pct > 0.0);

        assert_abs_diff_eq!(
            outcome.statement.owed.grand_total,
            100.0 * 12.0 + 50.0 + 10.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_tracks_are_independent() {
        let case = test_case();
        let outcome = AuditEngine::default().run_case(&case).unwrap();

        // a second run over the same inputs reproduces every figure
        let again = AuditEngine::default().run_case(&case).unwrap();
        assert_eq!(outcome.official.average_salary, again.official.average_salary);
        assert_eq!(outcome.recalculated.average_salary, again.recalculated.average_salary);
        assert_eq!(outcome.statement.owed.grand_total, again.statement.owed.grand_total);

        // the official track never sees the recalculated track's extra record
        assert_eq!(outcome.official.total_contributions, 4);
        assert_eq!(outcome.recalculated.total_contributions, 5);
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = AuditEngine::default().run_case(&test_case()).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"grand_total\""));
        assert!(json.contains("\"benefit_salary\""));
    }

    #[test]
    fn test_reference_case_fixture() {
        let loaded = LoadedCase::load_default().expect("fixture case");
        let case = AuditCase::from_loaded(&loaded).unwrap();
        let outcome = AuditEngine::default().run_case(&case).unwrap();

        // recalculated track: all 45 extract rows, floor-80% window of 36
        assert_eq!(outcome.recalculated.total_contributions, 45);
        assert_eq!(outcome.recalculated.considered_contributions, 36);
        assert_abs_diff_eq!(outcome.recalculated.average_salary, 5551.14, epsilon = 0.01);
        assert_eq!(outcome.reclaimable_periods, 13);

        // official track: the 30 admitted rows, window of 24
        assert_eq!(outcome.official.total_contributions, 30);
        assert_eq!(outcome.official.considered_contributions, 24);
        assert_abs_diff_eq!(outcome.official.average_salary, 5150.18, epsilon = 0.01);

        // schedule derived from the evolution table
        assert_eq!(outcome.statement.years.len(), 11);
        assert_abs_diff_eq!(outcome.statement.years[0].monthly_difference, 655.49, epsilon = 1e-9);

        let owed = &outcome.statement.owed;
        assert_abs_diff_eq!(owed.past_due_differences, 104002.64, epsilon = 0.01);
        assert_abs_diff_eq!(owed.monetary_correction, 8543.88, epsilon = 0.01);
        assert_abs_diff_eq!(owed.legal_interest, 8000.25, epsilon = 0.01);
        assert_abs_diff_eq!(owed.grand_total, 120546.77, epsilon = 0.01);
        assert_eq!(owed.monthly_installment_options.len(), 3);
    }

    #[test]
    fn test_empty_track_propagates_error() {
        let mut case = test_case();
        case.official.records.clear();
        let err = AuditEngine::default().run_case(&case).unwrap_err();
        assert!(matches!(err, AuditError::InsufficientData(_)));
    }
}
