//! CNIS record structures and case fixture loading

mod beneficiary;
mod contribution;
pub mod loader;

pub use beneficiary::{BeneficiarySnapshot, EmploymentLink, LinkStatus, ServiceTime};
pub use contribution::{AdmissibilityStatus, Competence, ContributionRecord};
pub use loader::LoadedCase;
