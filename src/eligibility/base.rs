//! Checks shared by every loan product

use super::amount::{is_valid_denomination, validate_amount};
use super::equity::EquityPosition;
use super::verdict::{Denial, EligibilityVerdict};
use crate::member::Member;
use crate::products::LoanProduct;

/// Run the product-independent checks and stop at the first failure
///
/// Order: denomination of a supplied amount, active membership, minimum
/// total equity, positive available equity, product tenure minimum, then
/// the rest of the amount policy. A malformed amount is reported as such
/// whatever the member's standing.
pub fn evaluate_base(
    product: &LoanProduct,
    member: &Member,
    position: &EquityPosition,
    tenure_months: u32,
    requested_amount: Option<f64>,
    denomination: f64,
) -> EligibilityVerdict {
    let verdict = EligibilityVerdict::approved(product.product_type, position, tenure_months, requested_amount);

    match check_base(product, member, position, tenure_months, requested_amount, denomination) {
        Ok(()) => verdict,
        Err(denial) => verdict.deny(denial),
    }
}

fn check_base(
    product: &LoanProduct,
    member: &Member,
    position: &EquityPosition,
    tenure_months: u32,
    requested_amount: Option<f64>,
    denomination: f64,
) -> Result<(), Denial> {
    if let Some(amount) = requested_amount {
        if !is_valid_denomination(amount, denomination) {
            return Err(Denial::InvalidDenomination { amount, denomination });
        }
    }

    if !member.is_active {
        return Err(Denial::MemberInactive);
    }

    if position.total_equity < product.min_equity_required {
        return Err(Denial::InsufficientEquity {
            total: position.total_equity,
            required: product.min_equity_required,
        });
    }

    if position.available_equity <= 0.0 {
        return Err(Denial::NoAvailableEquity { available: position.available_equity });
    }

    if let Some(required) = product.min_tenure_months {
        if tenure_months < required {
            return Err(Denial::InsufficientTenure { months: tenure_months, required });
        }
    }

    if let Some(amount) = requested_amount {
        validate_amount(product, amount, position.available_equity, denomination)?;
    }

    Ok(())
}
