//! Level-payment schedule projection
//!
//! Produces projected ledger rows for a loan so future payments can be shown
//! next to the recorded ones. Rows are rounded to cents; the final row
//! absorbs the rounding so the balance closes at exactly zero.

use super::entry::AmortizationEntry;
use crate::error::{EngineError, Result};
use chrono::{Months, NaiveDate};

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Level periodic payment for a principal at a monthly rate
///
/// Standard annuity formula; a zero rate repays principal in equal parts.
pub fn level_payment(principal: f64, monthly_rate: f64, term_months: u32) -> f64 {
    if term_months == 0 {
        return principal;
    }
    let n = term_months as f64;
    if monthly_rate.abs() < 1e-12 {
        return principal / n;
    }
    principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-n))
}

/// Project the full repayment schedule of a loan as projected entries
pub fn project_schedule(
    loan_id: &str,
    principal: f64,
    monthly_rate: f64,
    term_months: u32,
    first_payment_date: NaiveDate,
) -> Result<Vec<AmortizationEntry>> {
    if term_months == 0 {
        return Err(EngineError::InvalidRecord(format!("{}: term must be at least one month", loan_id)));
    }
    if principal <= 0.0 {
        return Err(EngineError::InvalidRecord(format!("{}: principal must be positive", loan_id)));
    }

    let payment = round_cents(level_payment(principal, monthly_rate, term_months));
    let mut balance = principal;
    let mut rows = Vec::with_capacity(term_months as usize);

    for period in 0..term_months {
        let payment_date = first_payment_date
            .checked_add_months(Months::new(period))
            .ok_or_else(|| EngineError::InvalidRecord(format!("{}: schedule runs past the calendar", loan_id)))?;

        let interest = round_cents(balance * monthly_rate);
        let principal_paid = if period + 1 == term_months {
            balance
        } else {
            round_cents(payment - interest).min(balance)
        };
        balance = round_cents(balance - principal_paid);

        rows.push(AmortizationEntry {
            loan_id: loan_id.to_string(),
            payment_date,
            school_year: None,
            principal_paid,
            interest_paid: interest,
            remaining_balance: balance,
            is_projected: true,
            scheduled_total_amount: Some(round_cents(principal_paid + interest)),
            actual_total_paid: None,
        });
    }

    Ok(rows)
}
