//! Contribution record structures matching the CNIS extract format

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

/// Calendar competence (month/year) of a contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Competence {
    pub year: i32,
    pub month: u32,
}

impl Competence {
    /// Create a competence, validating the month range
    pub fn new(year: i32, month: u32) -> Result<Self, AuditError> {
        if !(1..=12).contains(&month) {
            return Err(AuditError::InvalidInput(format!(
                "competence month {} outside 1..=12",
                month
            )));
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for Competence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

impl FromStr for Competence {
    type Err = AuditError;

    /// Parse the CNIS `MM/YYYY` competence format
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (month, year) = s.split_once('/').ok_or_else(|| {
            AuditError::InvalidInput(format!("competence '{}' is not MM/YYYY", s))
        })?;
        let month: u32 = month
            .parse()
            .map_err(|_| AuditError::InvalidInput(format!("competence month '{}'", month)))?;
        let year: i32 = year
            .parse()
            .map_err(|_| AuditError::InvalidInput(format!("competence year '{}'", year)))?;
        Competence::new(year, month)
    }
}

/// Whether the agency admitted the contribution for benefit computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmissibilityStatus {
    /// Admitted ("Considerado" in the CNIS extract)
    Accepted,
    /// Refused ("Indeferido" in the CNIS extract)
    Rejected,
}

impl AdmissibilityStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AdmissibilityStatus::Accepted)
    }

    /// String representation used in the fixture CSV files
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissibilityStatus::Accepted => "accepted",
            AdmissibilityStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for AdmissibilityStatus {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(AdmissibilityStatus::Accepted),
            "rejected" => Ok(AdmissibilityStatus::Rejected),
            other => Err(AuditError::InvalidInput(format!(
                "admissibility status '{}'",
                other
            ))),
        }
    }
}

/// A single monthly contribution from the CNIS extract
///
/// `corrected_value` is an independently supplied authoritative field. The
/// reference extract happens to satisfy `nominal_salary * correction_index`,
/// but the correction-index algorithm is not specified here, so the field is
/// never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// Competence month of the contribution
    pub competence: Competence,

    /// Nominal salary at the competence, in currency units
    pub nominal_salary: f64,

    /// Monetary-correction multiplier applied by the registry
    pub correction_index: f64,

    /// Wage-indexed value used for averaging (authoritative)
    pub corrected_value: f64,

    /// Admissibility ruling from the agency
    pub status: AdmissibilityStatus,
}

impl ContributionRecord {
    pub fn new(
        competence: Competence,
        nominal_salary: f64,
        correction_index: f64,
        corrected_value: f64,
        status: AdmissibilityStatus,
    ) -> Result<Self, AuditError> {
        let record = Self {
            competence,
            nominal_salary,
            correction_index,
            corrected_value,
            status,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the record invariants
    pub fn validate(&self) -> Result<(), AuditError> {
        if !self.corrected_value.is_finite() || self.corrected_value < 0.0 {
            return Err(AuditError::InvalidInput(format!(
                "corrected value {} for competence {}",
                self.corrected_value, self.competence
            )));
        }
        if !self.correction_index.is_finite() || self.correction_index <= 0.0 {
            return Err(AuditError::InvalidInput(format!(
                "correction index {} for competence {}",
                self.correction_index, self.competence
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competence_parse_and_display() {
        let c: Competence = "01/2014".parse().unwrap();
        assert_eq!(c, Competence { year: 2014, month: 1 });
        assert_eq!(c.to_string(), "01/2014");

        assert!("13/2014".parse::<Competence>().is_err());
        assert!("2014".parse::<Competence>().is_err());
    }

    #[test]
    fn test_competence_ordering() {
        let a: Competence = "12/2013".parse().unwrap();
        let b: Competence = "01/2014".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(
            "accepted".parse::<AdmissibilityStatus>().unwrap(),
            AdmissibilityStatus::Accepted
        );
        assert_eq!(AdmissibilityStatus::Rejected.as_str(), "rejected");
        assert!("considered".parse::<AdmissibilityStatus>().is_err());
    }

    #[test]
    fn test_record_invariants() {
        let competence = Competence::new(2014, 1).unwrap();

        let ok = ContributionRecord::new(
            competence,
            4390.24,
            1.005,
            4412.19,
            AdmissibilityStatus::Accepted,
        );
        assert!(ok.is_ok());

        let negative = ContributionRecord::new(
            competence,
            4390.24,
            1.005,
            -1.0,
            AdmissibilityStatus::Accepted,
        );
        assert!(matches!(negative, Err(AuditError::InvalidInput(_))));

        let zero_index = ContributionRecord::new(
            competence,
            4390.24,
            0.0,
            4412.19,
            AdmissibilityStatus::Accepted,
        );
        assert!(matches!(zero_index, Err(AuditError::InvalidInput(_))));
    }
}
