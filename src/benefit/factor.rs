//! Pension factor ("fator previdenciário") calculation
//!
//! Statutory multiplier adjusting the benefit for contribution time, age,
//! and life expectancy:
//!
//! ```text
//! factor = (Tc * a) / Es * [1 + (Id + Tc * a) / 100]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// Inputs to the pension factor formula
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorInputs {
    /// Tc: contribution time in decimal years
    pub contribution_time_years: f64,

    /// a: contribution rate as a decimal fraction (e.g. 0.31)
    pub contribution_rate: f64,

    /// Es: life expectancy at requirement, in decimal years
    pub life_expectancy_years: f64,

    /// Id: age at requirement, in decimal years
    pub age_years: f64,
}

impl FactorInputs {
    /// Check the formula's domain: all inputs positive and finite, rate in
    /// (0, 1]. A non-positive life expectancy is a contract violation, not a
    /// domain case.
    pub fn validate(&self) -> Result<(), AuditError> {
        let positive_finite = [
            ("contribution time", self.contribution_time_years),
            ("contribution rate", self.contribution_rate),
            ("life expectancy", self.life_expectancy_years),
            ("age", self.age_years),
        ];
        for (label, value) in positive_finite {
            if !value.is_finite() || value <= 0.0 {
                return Err(AuditError::InvalidInput(format!(
                    "{} must be positive, got {}",
                    label, value
                )));
            }
        }
        if self.contribution_rate > 1.0 {
            return Err(AuditError::InvalidInput(format!(
                "contribution rate {} exceeds 1.0",
                self.contribution_rate
            )));
        }
        Ok(())
    }
}

/// Compute the pension factor.
///
/// No clamping is applied: the statutory formula has no upper bound, so
/// factors above 1.0 pass through unchanged. Intermediate values stay at
/// full `f64` precision; currency rounding belongs to the display layer.
pub fn pension_factor(inputs: &FactorInputs) -> Result<f64, AuditError> {
    inputs.validate()?;

    let weighted_time = inputs.contribution_time_years * inputs.contribution_rate;
    let expectancy_ratio = weighted_time / inputs.life_expectancy_years;
    let age_adjustment = 1.0 + (inputs.age_years + weighted_time) / 100.0;

    Ok(expectancy_ratio * age_adjustment)
}
