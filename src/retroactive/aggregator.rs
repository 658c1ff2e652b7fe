//! Owed-total aggregation and installment simulation
//!
//! Accumulates the yearly shortfall schedule into past-due differences,
//! monetary correction, and legal interest, then prices fixed monthly
//! installments with the standard amortized-loan annuity formula
//! (Price table).

use std::collections::BTreeMap;

use serde::Serialize;

use super::schedule::YearlyScheduleRow;
use crate::error::AuditError;

/// Reference legal interest rate: 0.5% per month
pub const DEFAULT_MONTHLY_INTEREST_RATE: f64 = 0.005;

/// Installment simulation parameters
#[derive(Debug, Clone)]
pub struct InstallmentPlan {
    /// Installment counts to price (e.g. 24, 36, 60 months)
    pub counts: Vec<u32>,

    /// Monthly interest rate applied by the annuity formula
    pub monthly_rate: f64,
}

impl Default for InstallmentPlan {
    fn default() -> Self {
        Self {
            counts: vec![24, 36, 60],
            monthly_rate: DEFAULT_MONTHLY_INTEREST_RATE,
        }
    }
}

/// One year of aggregated differences
#[derive(Debug, Clone, Serialize)]
pub struct YearlyDifference {
    pub year: i32,
    pub monthly_difference: f64,
    pub months_in_year: u32,

    /// `monthly_difference * months_in_year`
    pub accumulated_for_year: f64,

    pub monetary_correction: f64,
    pub legal_interest: f64,

    /// `accumulated_for_year + monetary_correction + legal_interest`
    pub total_for_year: f64,
}

/// Cross-year owed totals
#[derive(Debug, Clone, Serialize)]
pub struct OwedTotal {
    pub past_due_differences: f64,
    pub monetary_correction: f64,
    pub legal_interest: f64,

    /// Sum of the three components above, exactly
    pub grand_total: f64,

    /// Fixed monthly payment per configured installment count
    pub monthly_installment_options: BTreeMap<u32, f64>,
}

/// Full aggregation output: per-year breakdown plus the owed totals
#[derive(Debug, Clone, Serialize)]
pub struct RetroactiveStatement {
    pub years: Vec<YearlyDifference>,
    pub owed: OwedTotal,
}

/// Fixed monthly payment amortizing `principal` over `installments` months.
///
/// Standard annuity: `principal * r / (1 - (1+r)^-n)`. A zero rate
/// degenerates to `principal / n`.
pub fn installment_payment(
    principal: f64,
    monthly_rate: f64,
    installments: u32,
) -> Result<f64, AuditError> {
    if installments == 0 {
        return Err(AuditError::InvalidInput(
            "installment count must be positive".to_string(),
        ));
    }
    if !monthly_rate.is_finite() || monthly_rate < 0.0 {
        return Err(AuditError::InvalidInput(format!(
            "monthly rate {} must be non-negative",
            monthly_rate
        )));
    }
    if !principal.is_finite() {
        return Err(AuditError::InvalidInput(format!(
            "principal {} is not finite",
            principal
        )));
    }

    if monthly_rate == 0.0 {
        return Ok(principal / installments as f64);
    }

    let discount = (1.0 + monthly_rate).powi(-(installments as i32));
    Ok(principal * monthly_rate / (1.0 - discount))
}

/// Aggregate a yearly schedule into a retroactive statement.
///
/// An empty schedule is a valid vacuous aggregation and yields a zero
/// `OwedTotal`. The grand total is defined as the sum of the three
/// components, so the decomposition invariant holds exactly.
pub fn aggregate(
    schedule: &[YearlyScheduleRow],
    plan: &InstallmentPlan,
) -> Result<RetroactiveStatement, AuditError> {
    let mut years = Vec::with_capacity(schedule.len());
    let mut past_due_differences = 0.0;
    let mut monetary_correction = 0.0;
    let mut legal_interest = 0.0;

    for row in schedule {
        if !(1..=12).contains(&row.months_in_year) {
            return Err(AuditError::InvalidInput(format!(
                "year {}: months in year {} outside 1..=12",
                row.year, row.months_in_year
            )));
        }
        for (label, value) in [
            ("monthly difference", row.monthly_difference),
            ("monetary correction", row.monetary_correction),
            ("legal interest", row.legal_interest),
        ] {
            if !value.is_finite() {
                return Err(AuditError::InvalidInput(format!(
                    "year {}: {} is not finite",
                    row.year, label
                )));
            }
        }

        let accumulated_for_year = row.monthly_difference * row.months_in_year as f64;
        let total_for_year = accumulated_for_year + row.monetary_correction + row.legal_interest;

        past_due_differences += accumulated_for_year;
        monetary_correction += row.monetary_correction;
        legal_interest += row.legal_interest;

        years.push(YearlyDifference {
            year: row.year,
            monthly_difference: row.monthly_difference,
            months_in_year: row.months_in_year,
            accumulated_for_year,
            monetary_correction: row.monetary_correction,
            legal_interest: row.legal_interest,
            total_for_year,
        });
    }

    let grand_total = past_due_differences + monetary_correction + legal_interest;

    let mut monthly_installment_options = BTreeMap::new();
    for &count in &plan.counts {
        let payment = installment_payment(grand_total, plan.monthly_rate, count)?;
        monthly_installment_options.insert(count, payment);
    }

    Ok(RetroactiveStatement {
        years,
        owed: OwedTotal {
            past_due_differences,
            monetary_correction,
            legal_interest,
            grand_total,
            monthly_installment_options,
        },
    })
}
