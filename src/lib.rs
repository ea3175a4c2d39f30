//! Benefits Engine - Loan eligibility and amortization for provident fund members
//!
//! This library provides:
//! - Membership tenure and equity position calculations
//! - Loan eligibility: shared base checks plus per-product rules
//!   (Regular, Emergency, Special, Short-Term, Car, Motorcycle)
//! - Amortization ledger reconciliation (filters, shortfall detection)
//!   and level-payment schedule projection
//! - Loan application intake with an append-only status history
//! - Repository traits and a service layer that resolves records for the engine

pub mod amortization;
pub mod application;
pub mod eligibility;
pub mod error;
pub mod member;
pub mod products;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use amortization::{reconcile_amortization, AmortizationEntry, AmortizationFilter, AmortizationView};
pub use application::{ApplicationRequest, ApplicationStatus, LoanApplication, SubmissionOutcome};
pub use eligibility::{
    compute_equity_position, compute_tenure_months, Denial, EligibilityEngine, EligibilityVerdict, EquityPosition,
};
pub use error::EngineError;
pub use member::{ActiveLoan, EquityStatement, Member};
pub use products::{LoanPolicy, LoanProduct, ProductType};
pub use repository::{ApplicationStore, InMemoryRepository, MemberRecords};
pub use service::LoanDesk;
