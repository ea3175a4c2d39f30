//! Numeric constraints every requested amount must satisfy

use super::verdict::Denial;
use crate::products::LoanProduct;

/// True when `amount` is a positive whole multiple of `denomination`
pub fn is_valid_denomination(amount: f64, denomination: f64) -> bool {
    amount > 0.0 && amount.is_finite() && amount % denomination == 0.0
}

/// Check a requested amount against denomination, availability, and product bounds
///
/// Rules run in a fixed order and the first failure is returned. Amounts
/// are never rounded to fit.
pub fn validate_amount(
    product: &LoanProduct,
    amount: f64,
    available_equity: f64,
    denomination: f64,
) -> Result<(), Denial> {
    if !is_valid_denomination(amount, denomination) {
        return Err(Denial::InvalidDenomination { amount, denomination });
    }

    if amount > available_equity {
        return Err(Denial::ExceedsAvailableEquity {
            amount,
            available: available_equity,
            shortfall: amount - available_equity,
        });
    }

    if amount < product.min_amount {
        return Err(Denial::BelowMinimum { amount, minimum: product.min_amount });
    }

    if amount > product.max_amount {
        return Err(Denial::AboveMaximum { amount, maximum: product.max_amount });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::{ProductCatalog, ProductType};

    fn emergency() -> LoanProduct {
        ProductCatalog::default_catalog()
            .get(ProductType::Emergency)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_denomination() {
        assert!(is_valid_denomination(60_000.0, 1_000.0));
        assert!(!is_valid_denomination(60_500.0, 1_000.0));
        assert!(!is_valid_denomination(0.0, 1_000.0));
        assert!(!is_valid_denomination(-2_000.0, 1_000.0));
        assert!(!is_valid_denomination(f64::NAN, 1_000.0));
    }

    #[test]
    fn test_rule_order() {
        let product = emergency();

        // Bad denomination wins over everything else
        assert!(matches!(
            validate_amount(&product, 999_999.0, 100.0, 1_000.0),
            Err(Denial::InvalidDenomination { .. })
        ));

        // Availability is checked before product bounds
        assert_eq!(
            validate_amount(&product, 80_000.0, 71_199.25, 1_000.0),
            Err(Denial::ExceedsAvailableEquity {
                amount: 80_000.0,
                available: 71_199.25,
                shortfall: 8_800.75,
            })
        );

        assert_eq!(
            validate_amount(&product, 60_000.0, 100_000.0, 1_000.0),
            Err(Denial::AboveMaximum { amount: 60_000.0, maximum: 50_000.0 })
        );
    }

    #[test]
    fn test_below_minimum() {
        let mut product = emergency();
        product.min_amount = 5_000.0;
        assert_eq!(
            validate_amount(&product, 2_000.0, 100_000.0, 1_000.0),
            Err(Denial::BelowMinimum { amount: 2_000.0, minimum: 5_000.0 })
        );
    }

    #[test]
    fn test_valid_amount() {
        assert_eq!(validate_amount(&emergency(), 10_000.0, 71_199.25, 1_000.0), Ok(()));
    }
}
