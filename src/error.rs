//! Errors for record lookup and data loading
//!
//! Eligibility outcomes are never errors: an unmet rule is a negative
//! verdict (see [`crate::eligibility::Denial`]). The variants here cover
//! missing or malformed records, which the calling request cannot answer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("member not found: {0}")]
    MemberNotFound(String),

    /// Member exists but has no equity statement on record
    #[error("equity position unavailable for member {0}")]
    EquityUnavailable(String),

    #[error("no product configured for loan type {0}")]
    ProductNotConfigured(String),

    #[error("loan not found: {0}")]
    LoanNotFound(String),

    #[error("application not found: {0}")]
    ApplicationNotFound(String),

    #[error("application {0} already exists")]
    DuplicateApplication(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid date: {0}")]
    DateParse(#[from] chrono::ParseError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
