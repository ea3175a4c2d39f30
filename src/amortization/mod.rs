//! Amortization ledgers: reconciliation views and schedule projection

mod entry;
mod reconcile;
mod schedule;
pub mod loader;

pub use entry::AmortizationEntry;
pub use reconcile::{reconcile_amortization, AmortizationFilter, AmortizationView, ReconciledEntry, Shortfall};
pub use schedule::{level_payment, project_schedule};
pub use loader::load_entries;
