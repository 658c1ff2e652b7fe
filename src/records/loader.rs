//! CSV/JSON-based case loader
//!
//! Loads an audit case from fixture files in data/case/

use std::error::Error;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::beneficiary::{BeneficiarySnapshot, EmploymentLink, LinkStatus};
use super::contribution::ContributionRecord;
use crate::benefit::{BenefitEvolutionRow, FactorInputs};
use crate::retroactive::YearlyAdjustment;

/// Default path to the case directory
pub const DEFAULT_CASE_PATH: &str = "data/case";

/// Load the CNIS contribution extract from CSV
///
/// Columns: competence (MM/YYYY), nominal salary, correction index,
/// corrected value, admissibility status
pub fn load_contributions(path: &Path) -> Result<Vec<ContributionRecord>, Box<dyn Error>> {
    let file = File::open(path.join("contributions.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();

    for result in reader.records() {
        let record = result?;
        let contribution = ContributionRecord::new(
            record[0].parse()?,
            record[1].parse()?,
            record[2].parse()?,
            record[3].parse()?,
            record[4].parse()?,
        )?;
        records.push(contribution);
    }

    Ok(records)
}

/// Load the CNIS employment-link table from CSV
///
/// Columns: seq, nit, employer, cnpj (empty if none), start, end (empty if
/// none), status
pub fn load_employment_links(path: &Path) -> Result<Vec<EmploymentLink>, Box<dyn Error>> {
    let file = File::open(path.join("employment_links.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut links = Vec::new();

    for result in reader.records() {
        let record = result?;
        let status = match &record[6] {
            "active" => LinkStatus::Active,
            "closed" => LinkStatus::Closed,
            other => return Err(format!("unknown link status '{}'", other).into()),
        };
        links.push(EmploymentLink {
            seq: record[0].parse()?,
            nit: record[1].to_string(),
            employer: record[2].to_string(),
            cnpj: non_empty(&record[3]),
            start: record[4].to_string(),
            end: non_empty(&record[5]),
            status,
        });
    }

    Ok(links)
}

/// Load the yearly benefit evolution table from CSV
///
/// Columns: year, official value, recalculated value, adjustment %,
/// reference index %
pub fn load_benefit_evolution(path: &Path) -> Result<Vec<BenefitEvolutionRow>, Box<dyn Error>> {
    let file = File::open(path.join("benefit_evolution.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        rows.push(BenefitEvolutionRow {
            year: record[0].parse()?,
            official: record[1].parse()?,
            recalculated: record[2].parse()?,
            adjustment_pct: record[3].parse()?,
            reference_index_pct: record[4].parse()?,
        });
    }

    Ok(rows)
}

/// Load per-year correction and interest amounts from CSV
///
/// Columns: year, months in year, monetary correction, legal interest
pub fn load_yearly_adjustments(path: &Path) -> Result<Vec<YearlyAdjustment>, Box<dyn Error>> {
    let file = File::open(path.join("yearly_adjustments.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut adjustments = Vec::new();

    for result in reader.records() {
        let record = result?;
        adjustments.push(YearlyAdjustment {
            year: record[0].parse()?,
            months_in_year: record[1].parse()?,
            monetary_correction: record[2].parse()?,
            legal_interest: record[3].parse()?,
        });
    }

    Ok(adjustments)
}

/// Beneficiary identity plus both tracks' factor inputs, from case.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseProfile {
    pub beneficiary: BeneficiarySnapshot,
    pub official_factor: FactorInputs,
    pub recalculated_factor: FactorInputs,
}

/// Load the case profile from case.json
pub fn load_case_profile(path: &Path) -> Result<CaseProfile, Box<dyn Error>> {
    let file = File::open(path.join("case.json"))?;
    let profile = serde_json::from_reader(file)?;
    Ok(profile)
}

fn non_empty(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// All fixture data for one audit case
pub struct LoadedCase {
    pub profile: CaseProfile,
    pub contributions: Vec<ContributionRecord>,
    pub links: Vec<EmploymentLink>,
    pub evolution: Vec<BenefitEvolutionRow>,
    pub adjustments: Vec<YearlyAdjustment>,
}

impl LoadedCase {
    /// Load the case from the default path
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_CASE_PATH))
    }

    /// Load the case from a specific directory
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            profile: load_case_profile(path)?,
            contributions: load_contributions(path)?,
            links: load_employment_links(path)?,
            evolution: load_benefit_evolution(path)?,
            adjustments: load_yearly_adjustments(path)?,
        })
    }

    /// Record set for the official track: only the contributions the agency
    /// admitted
    pub fn official_records(&self) -> Vec<ContributionRecord> {
        self.contributions
            .iter()
            .filter(|r| r.status.is_accepted())
            .cloned()
            .collect()
    }

    /// Record set for the recalculated track: the audit treats every extract
    /// row as a valid contribution
    pub fn recalculated_records(&self) -> Vec<ContributionRecord> {
        self.contributions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_case() {
        let result = LoadedCase::load_default();
        assert!(result.is_ok(), "Failed to load case: {:?}", result.err());

        let case = result.unwrap();

        // CNIS extract loaded
        assert_eq!(case.contributions.len(), 45);
        assert_eq!(case.official_records().len(), 30);
        assert_eq!(case.recalculated_records().len(), 45);

        // Employment links loaded
        assert_eq!(case.links.len(), 8);
        assert!(case.links.iter().any(|l| l.status == LinkStatus::Active));

        // Evolution and adjustments cover the same years
        assert_eq!(case.evolution.len(), 11);
        assert_eq!(case.adjustments.len(), 11);

        // Profile loaded
        assert!(!case.profile.beneficiary.name.is_empty());
        assert!(case.profile.recalculated_factor.contribution_time_years > 0.0);
    }
}
