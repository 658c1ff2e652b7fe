//! Contribution selection under the statutory 80% rule
//!
//! Sorts a record set by corrected value and averages the highest-value
//! slice. The selector never filters by admissibility status: each benefit
//! track supplies the record set it treats as valid, and the selector
//! operates over whatever it is given.

use serde::Serialize;

use crate::error::AuditError;
use crate::records::ContributionRecord;

/// Fraction of highest-value contributions retained for the salary average
pub const SELECTION_RATIO: f64 = 0.8;

/// Result of applying the 80% rule to one record set
#[derive(Debug, Clone, Serialize)]
pub struct SelectionOutcome {
    /// Number of records analyzed
    pub total_count: usize,

    /// floor(total * 0.8), the averaging window size
    pub considered_count: usize,

    /// Arithmetic mean of corrected values over the considered window
    pub average: f64,

    /// Rejected records ranked inside the considered window. These are the
    /// periods an audit flags as wrongly refused: their corrected values are
    /// high enough to belong in the average.
    pub rejected_within_cut: usize,

    /// The considered records, descending by corrected value
    pub selected: Vec<ContributionRecord>,
}

/// Apply the 80% rule: stable descending sort by corrected value, floor-80%
/// cut, arithmetic mean over the cut.
///
/// Ties keep input order (stable sort). The statute does not define a
/// tie-break; input order is the documented choice here and is covered by a
/// test.
pub fn select_highest(records: &[ContributionRecord]) -> Result<SelectionOutcome, AuditError> {
    for record in records {
        record.validate()?;
    }

    let total_count = records.len();
    // floor of the statutory 80%, in integer arithmetic
    let considered_count = total_count * 4 / 5;

    if considered_count == 0 {
        return Err(AuditError::InsufficientData(format!(
            "{} record(s) leave an empty averaging window",
            total_count
        )));
    }

    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.corrected_value.total_cmp(&a.corrected_value));
    sorted.truncate(considered_count);

    let sum: f64 = sorted.iter().map(|r| r.corrected_value).sum();
    let average = sum / considered_count as f64;

    let rejected_within_cut = sorted
        .iter()
        .filter(|r| !r.status.is_accepted())
        .count();

    Ok(SelectionOutcome {
        total_count,
        considered_count,
        average,
        rejected_within_cut,
        selected: sorted,
    })
}
