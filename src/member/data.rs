//! Member, equity statement, and active loan records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::products::ProductType;

/// Tolerance when checking that a balance total matches its components
const BALANCE_TOLERANCE: f64 = 0.005;

/// A fund member as supplied by the membership system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique member identifier
    pub member_id: String,

    /// Display name
    pub name: String,

    /// Date of membership in the fund
    pub enrollment_date: NaiveDate,

    /// Net monthly take-home pay
    pub net_pay: f64,

    /// Whether the membership is active
    pub is_active: bool,
}

impl Member {
    pub fn new(member_id: impl Into<String>, enrollment_date: NaiveDate, net_pay: f64) -> Self {
        let member_id = member_id.into();
        Self {
            name: member_id.clone(),
            member_id,
            enrollment_date,
            net_pay,
            is_active: true,
        }
    }
}

/// One side of an equity statement (starting or ending balance)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceBreakdown {
    pub member_contributions: f64,
    pub employer_contributions: f64,
    pub member_earnings: f64,
    pub employer_earnings: f64,
    pub total: f64,
}

impl BalanceBreakdown {
    /// Build a balance whose total is the sum of its four components
    pub fn from_components(
        member_contributions: f64,
        employer_contributions: f64,
        member_earnings: f64,
        employer_earnings: f64,
    ) -> Self {
        Self {
            member_contributions,
            employer_contributions,
            member_earnings,
            employer_earnings,
            total: member_contributions + employer_contributions + member_earnings + employer_earnings,
        }
    }

    pub fn component_sum(&self) -> f64 {
        self.member_contributions + self.employer_contributions + self.member_earnings + self.employer_earnings
    }

    /// Check the total = sum of components invariant
    pub fn is_consistent(&self) -> bool {
        (self.total - self.component_sum()).abs() < BALANCE_TOLERANCE
    }
}

/// Periodic equity statement for one member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityStatement {
    pub statement_id: String,
    pub member_id: String,

    /// Statement period
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,

    /// Date the balances were struck
    pub as_of: NaiveDate,

    pub starting_balance: BalanceBreakdown,
    pub ending_balance: BalanceBreakdown,

    /// Contributions received during the period
    #[serde(default)]
    pub period_contributions: f64,

    /// Withdrawals paid out during the period
    #[serde(default)]
    pub period_withdrawals: f64,
}

impl EquityStatement {
    /// Total equity at the end of the statement period
    pub fn ending_equity(&self) -> f64 {
        self.ending_balance.total
    }
}

/// An outstanding loan held by a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveLoan {
    pub loan_id: String,
    pub member_id: String,

    /// Reference code printed on the promissory note
    pub loan_code: String,

    pub product_type: ProductType,

    /// Principal (promissory note amount)
    pub principal: f64,

    /// Outstanding balance and the date it was struck
    pub outstanding_balance: f64,
    pub outstanding_as_of: NaiveDate,

    pub date_granted: Option<NaiveDate>,
    pub date_released: Option<NaiveDate>,
    pub maturity_date: Option<NaiveDate>,

    /// Repayment term in months
    pub term_months: u32,

    /// Scheduled periodic repayment
    #[serde(default)]
    pub repayment_amount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_from_components() {
        let balance = BalanceBreakdown::from_components(40_000.0, 22_000.0, 2_000.0, 1_000.0);
        assert_eq!(balance.total, 65_000.0);
        assert!(balance.is_consistent());
    }

    #[test]
    fn test_balance_inconsistent_total() {
        let mut balance = BalanceBreakdown::from_components(40_000.0, 22_000.0, 2_000.0, 1_000.0);
        balance.total = 66_000.0;
        assert!(!balance.is_consistent());
    }

    #[test]
    fn test_new_member_is_active() {
        let member = Member::new("user1", NaiveDate::from_ymd_opt(2010, 6, 1).unwrap(), 25_000.0);
        assert!(member.is_active);
        assert_eq!(member.name, "user1");
    }
}
