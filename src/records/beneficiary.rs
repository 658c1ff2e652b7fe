//! Beneficiary identity and CNIS employment-link data
//!
//! Pass-through display data: nothing here is computationally load-bearing,
//! but the audit outcome carries it so callers can render a full report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A duration expressed the way benefit letters state it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTime {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl ServiceTime {
    /// Decimal-year approximation for display alongside factor inputs
    pub fn approximate_years(&self) -> f64 {
        self.years as f64 + self.months as f64 / 12.0 + self.days as f64 / 365.25
    }
}

/// Identity block of the audited beneficiary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeneficiarySnapshot {
    pub name: String,
    pub cpf: String,
    pub nit: String,
    pub benefit_number: String,
    pub benefit_species: String,
    pub birth_date: NaiveDate,
    /// Date of the benefit requirement (DER)
    pub requirement_date: NaiveDate,
    pub age_at_requirement: ServiceTime,
    pub contribution_time: ServiceTime,
}

/// Status of an employment link in the CNIS extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    Active,
    Closed,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::Active => "active",
            LinkStatus::Closed => "closed",
        }
    }
}

/// One employment link row from the CNIS extract
///
/// Start/end are kept as the registry's display labels (some rows carry
/// month-only or missing dates), since the link table never feeds computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmploymentLink {
    pub seq: u32,
    pub nit: String,
    pub employer: String,
    pub cnpj: Option<String>,
    pub start: String,
    pub end: Option<String>,
    pub status: LinkStatus,
}
