//! Amortization ledger rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One payment row of a loan's amortization ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub loan_id: String,

    pub payment_date: NaiveDate,

    /// School year the payment falls in, e.g. "2023-2024"
    #[serde(default)]
    pub school_year: Option<String>,

    pub principal_paid: f64,
    pub interest_paid: f64,

    /// Loan balance after this payment
    pub remaining_balance: f64,

    /// Future row that is not yet due
    pub is_projected: bool,

    /// Amount due for the period, when tracked
    #[serde(default)]
    pub scheduled_total_amount: Option<f64>,

    /// Amount actually collected for the period, when tracked
    #[serde(default)]
    pub actual_total_paid: Option<f64>,
}

impl AmortizationEntry {
    /// Amount collected short of the scheduled amount on a completed row
    ///
    /// Projected rows and rows without both amounts never report a shortfall.
    pub fn shortfall(&self) -> Option<f64> {
        if self.is_projected {
            return None;
        }
        match (self.scheduled_total_amount, self.actual_total_paid) {
            (Some(scheduled), Some(actual)) if actual < scheduled => Some(scheduled - actual),
            _ => None,
        }
    }

    pub fn total_paid(&self) -> f64 {
        self.principal_paid + self.interest_paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(is_projected: bool, scheduled: Option<f64>, actual: Option<f64>) -> AmortizationEntry {
        AmortizationEntry {
            loan_id: "loan1".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2023, 2, 20).unwrap(),
            school_year: Some("2023-2024".to_string()),
            principal_paid: 2_400.0,
            interest_paid: 200.0,
            remaining_balance: 57_600.0,
            is_projected,
            scheduled_total_amount: scheduled,
            actual_total_paid: actual,
        }
    }

    #[test]
    fn test_shortfall_detected() {
        assert_eq!(entry(false, Some(2_600.0), Some(2_100.0)).shortfall(), Some(500.0));
    }

    #[test]
    fn test_projected_never_short() {
        assert_eq!(entry(true, Some(2_600.0), Some(2_100.0)).shortfall(), None);
        assert_eq!(entry(true, Some(2_600.0), Some(0.0)).shortfall(), None);
    }

    #[test]
    fn test_no_shortfall_when_paid_or_untracked() {
        assert_eq!(entry(false, Some(2_600.0), Some(2_600.0)).shortfall(), None);
        assert_eq!(entry(false, Some(2_600.0), Some(3_000.0)).shortfall(), None);
        assert_eq!(entry(false, Some(2_600.0), None).shortfall(), None);
        assert_eq!(entry(false, None, Some(2_100.0)).shortfall(), None);
    }

    #[test]
    fn test_total_paid() {
        assert_eq!(entry(false, None, None).total_paid(), 2_600.0);
    }
}
