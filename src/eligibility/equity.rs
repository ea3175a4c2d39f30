//! Equity aggregation across statements and active loans

use serde::{Deserialize, Serialize};

use crate::member::{ActiveLoan, EquityStatement};

/// A member's borrowing position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPosition {
    /// Ending total of the most recent statement
    pub total_equity: f64,

    /// Sum of outstanding balances across active loans
    pub outstanding_total: f64,

    /// Total equity less outstanding loans; may be zero or negative
    pub available_equity: f64,
}

impl EquityPosition {
    pub fn new(total_equity: f64, outstanding_total: f64) -> Self {
        Self {
            total_equity,
            outstanding_total,
            available_equity: total_equity - outstanding_total,
        }
    }
}

/// Most recent statement for a member, by period end then as-of date
pub fn latest_statement<'a>(member_id: &str, statements: &'a [EquityStatement]) -> Option<&'a EquityStatement> {
    statements
        .iter()
        .filter(|s| s.member_id == member_id)
        .max_by_key(|s| (s.period_end, s.as_of))
}

/// Sum of outstanding balances on a member's active loans
pub fn outstanding_total(member_id: &str, loans: &[ActiveLoan]) -> f64 {
    loans
        .iter()
        .filter(|l| l.member_id == member_id)
        .map(|l| l.outstanding_balance)
        .sum()
}

/// Equity position from the latest statement; zero equity when none exists
pub fn compute_equity_position(
    member_id: &str,
    statements: &[EquityStatement],
    loans: &[ActiveLoan],
) -> EquityPosition {
    let total_equity = latest_statement(member_id, statements)
        .map(EquityStatement::ending_equity)
        .unwrap_or(0.0);

    EquityPosition::new(total_equity, outstanding_total(member_id, loans))
}
