//! Loan applications: intake, status history, and document checklist

mod data;
mod intake;

pub use data::{ApplicationStatus, DocumentItem, LoanApplication, StatusChange};
pub use intake::{ApplicationRequest, IntakeError, SubmissionOutcome};
