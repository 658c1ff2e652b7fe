//! Benefit computation: pension factor, benefit salary, yearly evolution

mod evolution;
mod factor;
mod salary;

pub use evolution::BenefitEvolutionRow;
pub use factor::{pension_factor, FactorInputs};
pub use salary::{benefit_salary, ComparativeResult};
