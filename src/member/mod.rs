//! Member records and CSV loading

mod data;
pub mod loader;

pub use data::{Member, BalanceBreakdown, EquityStatement, ActiveLoan};
pub use loader::{load_members, load_equity, load_loans};
