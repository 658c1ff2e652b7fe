//! Error taxonomy for the computational core

use thiserror::Error;

/// Errors raised synchronously by the audit computations.
///
/// Nothing here is retryable: every variant is a deterministic validation
/// failure that must propagate to the caller unmodified. The core never
/// formats user-facing text beyond the diagnostic message.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Malformed or out-of-range numeric input (non-positive rates,
    /// non-positive denominators, invalid month counts)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Record set empty or too small for the percentile selection to
    /// produce a meaningful average
    #[error("insufficient data: {0}")]
    InsufficientData(String),
}
