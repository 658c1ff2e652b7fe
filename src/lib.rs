//! Pension Audit - benefit recalculation and retroactive-amount engine
//!
//! This library provides:
//! - Contribution selection under the statutory 80% rule
//! - Pension factor ("fator previdenciário") and benefit salary calculation
//! - Retroactive difference aggregation with monetary correction and legal interest
//! - Price-table installment simulation
//! - A comparative pipeline running official and recalculated benefit tracks

pub mod records;
pub mod selection;
pub mod benefit;
pub mod retroactive;
pub mod audit;
pub mod error;

// Re-export commonly used types
pub use audit::{AuditCase, AuditEngine, AuditOutcome, TrackInputs};
pub use benefit::{benefit_salary, pension_factor, ComparativeResult, FactorInputs};
pub use error::AuditError;
pub use records::{AdmissibilityStatus, BeneficiarySnapshot, Competence, ContributionRecord};
pub use retroactive::{aggregate, InstallmentPlan, OwedTotal, RetroactiveStatement};
pub use selection::{select_highest, SelectionOutcome};
