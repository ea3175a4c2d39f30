//! Product-specific rules layered on top of the base checks

use super::regular::{regular_tier, REGULAR_TENURE_TABLE};
use super::verdict::{Denial, EligibilityVerdict};
use crate::member::Member;
use crate::products::{LoanPolicy, LoanProduct, ProductType};

pub const EMERGENCY_TERM_MONTHS: u32 = 24;
pub const SPECIAL_TERM_MONTHS: u32 = 6;
pub const SHORT_TERM_TERM_MONTHS: u32 = 3;
pub const SHORT_TERM_MIN_TENURE_MONTHS: u32 = 36;
pub const CAR_TERM_MONTHS: u32 = 72;
pub const MOTORCYCLE_TERM_MONTHS: u32 = 36;
pub const VEHICLE_MIN_TENURE_MONTHS: u32 = 120;

/// Inputs available to a product rule
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub policy: &'a LoanPolicy,
    pub product: &'a LoanProduct,
    pub member: &'a Member,
    pub tenure_months: u32,
    pub available_equity: f64,
    pub requested_amount: Option<f64>,
}

/// Apply the rule set for the product's type to a passing base verdict
pub fn apply_product_rules(verdict: EligibilityVerdict, ctx: &RuleContext) -> EligibilityVerdict {
    match ctx.product.product_type {
        ProductType::Regular => regular_rules(verdict, ctx),
        ProductType::Emergency => flat_cap_rules(verdict, ctx, EMERGENCY_TERM_MONTHS),
        ProductType::Special => flat_cap_rules(verdict, ctx, SPECIAL_TERM_MONTHS),
        ProductType::ShortTerm => short_term_rules(verdict, ctx),
        ProductType::Car => vehicle_rules(verdict, ctx, CAR_TERM_MONTHS),
        ProductType::Motorcycle => vehicle_rules(verdict, ctx, MOTORCYCLE_TERM_MONTHS),
    }
}

fn require_tenure(tenure_months: u32, required: u32) -> Result<(), Denial> {
    if tenure_months < required {
        Err(Denial::InsufficientTenure { months: tenure_months, required })
    } else {
        Ok(())
    }
}

/// Tenure table cap, net pay floor, and the flat service fee
fn regular_rules(mut verdict: EligibilityVerdict, ctx: &RuleContext) -> EligibilityVerdict {
    if let Err(denial) = require_tenure(ctx.tenure_months, ctx.policy.regular_min_tenure_months) {
        return verdict.deny(denial);
    }

    if ctx.member.net_pay < ctx.policy.regular_min_net_pay {
        return verdict.deny(Denial::InsufficientNetPay {
            net_pay: ctx.member.net_pay,
            required: ctx.policy.regular_min_net_pay,
        });
    }

    // A policy floor under the table's first tier still has no cap to offer
    let Some(tier) = regular_tier(ctx.tenure_months) else {
        return verdict.deny(Denial::InsufficientTenure {
            months: ctx.tenure_months,
            required: REGULAR_TENURE_TABLE[0].min_months,
        });
    };

    if let Some(amount) = ctx.requested_amount {
        if amount > tier.max_loanable {
            return verdict.deny(Denial::ExceedsTenureCap {
                amount,
                cap: tier.max_loanable,
                tenure_months: ctx.tenure_months,
            });
        }
    }

    let fee = ctx.policy.regular_service_fee;
    verdict.dynamic_max_loanable = Some(ctx.available_equity.min(tier.max_loanable));
    verdict.dynamic_max_term_months = Some(tier.max_term_months());
    verdict.service_fee = Some(fee);
    verdict.net_proceeds = ctx.requested_amount.map(|amount| amount - fee);
    verdict
}

/// Emergency and Special: product ceiling only, pending their tenure tables
fn flat_cap_rules(mut verdict: EligibilityVerdict, ctx: &RuleContext, term_months: u32) -> EligibilityVerdict {
    verdict.dynamic_max_loanable = Some(ctx.available_equity.min(ctx.product.max_amount));
    verdict.dynamic_max_term_months = Some(term_months);
    verdict.provisional_cap = true;
    verdict
}

/// Fixed amount, fixed term, three years of membership
fn short_term_rules(mut verdict: EligibilityVerdict, ctx: &RuleContext) -> EligibilityVerdict {
    if let Err(denial) = require_tenure(ctx.tenure_months, SHORT_TERM_MIN_TENURE_MONTHS) {
        return verdict.deny(denial);
    }

    let required = ctx.policy.short_term_amount;
    match ctx.requested_amount {
        Some(amount) if amount != required => {
            return verdict.deny(Denial::FixedAmountRequired { amount, required });
        }
        // Preview: the one grantable amount must fit in available equity
        None if required > ctx.available_equity => {
            return verdict.deny(Denial::FixedAmountUnavailable {
                required,
                available: ctx.available_equity,
            });
        }
        _ => {}
    }

    verdict.dynamic_max_loanable = Some(required);
    verdict.dynamic_max_term_months = Some(SHORT_TERM_TERM_MONTHS);
    verdict
}

/// Car and Motorcycle: ten years of membership, product ceiling, fixed term
fn vehicle_rules(mut verdict: EligibilityVerdict, ctx: &RuleContext, term_months: u32) -> EligibilityVerdict {
    if let Err(denial) = require_tenure(ctx.tenure_months, VEHICLE_MIN_TENURE_MONTHS) {
        return verdict.deny(denial);
    }

    verdict.dynamic_max_loanable = Some(ctx.available_equity.min(ctx.product.max_amount));
    verdict.dynamic_max_term_months = Some(term_months);
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::equity::EquityPosition;
    use crate::eligibility::verdict::DenialCategory;
    use chrono::NaiveDate;

    fn member(net_pay: f64) -> Member {
        Member::new("user1", NaiveDate::from_ymd_opt(2010, 6, 1).unwrap(), net_pay)
    }

    fn run(
        product_type: ProductType,
        member: &Member,
        tenure_months: u32,
        available: f64,
        amount: Option<f64>,
    ) -> EligibilityVerdict {
        let policy = LoanPolicy::default_policy();
        let product = policy.product(product_type).unwrap();
        let position = EquityPosition::new(available, 0.0);
        let verdict = EligibilityVerdict::approved(product_type, &position, tenure_months, amount);
        let ctx = RuleContext {
            policy: &policy,
            product,
            member,
            tenure_months,
            available_equity: available,
            requested_amount: amount,
        };
        apply_product_rules(verdict, &ctx)
    }

    #[test]
    fn test_regular_enrichment() {
        let verdict = run(ProductType::Regular, &member(25_000.0), 168, 71_199.25, Some(60_000.0));
        assert!(verdict.eligible);
        assert_eq!(verdict.dynamic_max_loanable, Some(71_199.25));
        assert_eq!(verdict.dynamic_max_term_months, Some(60));
        assert_eq!(verdict.service_fee, Some(200.0));
        assert_eq!(verdict.net_proceeds, Some(59_800.0));
    }

    #[test]
    fn test_regular_table_cap_binds() {
        let verdict = run(ProductType::Regular, &member(25_000.0), 13, 100_000.0, None);
        assert_eq!(verdict.dynamic_max_loanable, Some(18_000.0));
        assert_eq!(verdict.dynamic_max_term_months, Some(36));
    }

    #[test]
    fn test_regular_rejects_above_table_cap_within_equity() {
        let verdict = run(ProductType::Regular, &member(25_000.0), 13, 100_000.0, Some(20_000.0));
        assert_eq!(
            verdict.reason,
            Some(Denial::ExceedsTenureCap { amount: 20_000.0, cap: 18_000.0, tenure_months: 13 })
        );
    }

    #[test]
    fn test_regular_tenure_and_net_pay() {
        let verdict = run(ProductType::Regular, &member(25_000.0), 4, 10_000.0, None);
        assert_eq!(verdict.reason, Some(Denial::InsufficientTenure { months: 4, required: 5 }));

        let verdict = run(ProductType::Regular, &member(2_999.0), 24, 10_000.0, None);
        assert_eq!(
            verdict.reason,
            Some(Denial::InsufficientNetPay { net_pay: 2_999.0, required: 3_000.0 })
        );
    }

    #[test]
    fn test_emergency_and_special_flat_cap() {
        let verdict = run(ProductType::Emergency, &member(0.0), 1, 71_199.25, None);
        assert!(verdict.eligible);
        assert_eq!(verdict.dynamic_max_loanable, Some(50_000.0));
        assert_eq!(verdict.dynamic_max_term_months, Some(24));
        assert!(verdict.provisional_cap);

        let verdict = run(ProductType::Special, &member(0.0), 1, 30_000.0, None);
        assert_eq!(verdict.dynamic_max_loanable, Some(30_000.0));
        assert_eq!(verdict.dynamic_max_term_months, Some(6));
    }

    #[test]
    fn test_short_term_exact_amount() {
        let verdict = run(ProductType::ShortTerm, &member(10_000.0), 36, 50_000.0, Some(5_000.0));
        assert!(verdict.eligible);
        assert_eq!(verdict.dynamic_max_term_months, Some(3));

        for amount in [1_000.0, 4_000.0, 6_000.0, 10_000.0] {
            let verdict = run(ProductType::ShortTerm, &member(10_000.0), 60, 50_000.0, Some(amount));
            assert_eq!(
                verdict.reason,
                Some(Denial::FixedAmountRequired { amount, required: 5_000.0 })
            );
        }
    }

    #[test]
    fn test_short_term_tenure_and_preview() {
        let verdict = run(ProductType::ShortTerm, &member(10_000.0), 35, 50_000.0, None);
        assert_eq!(verdict.reason, Some(Denial::InsufficientTenure { months: 35, required: 36 }));

        let verdict = run(ProductType::ShortTerm, &member(10_000.0), 40, 4_500.0, None);
        assert_eq!(
            verdict.reason,
            Some(Denial::FixedAmountUnavailable { required: 5_000.0, available: 4_500.0 })
        );
        assert_eq!(verdict.denial_category(), Some(DenialCategory::EligibilityDenied));

        let verdict = run(ProductType::ShortTerm, &member(10_000.0), 40, 5_000.0, None);
        assert!(verdict.eligible);
        assert_eq!(verdict.dynamic_max_loanable, Some(5_000.0));
    }

    #[test]
    fn test_vehicle_loans() {
        let verdict = run(ProductType::Car, &member(10_000.0), 119, 500_000.0, None);
        assert_eq!(verdict.reason, Some(Denial::InsufficientTenure { months: 119, required: 120 }));

        let verdict = run(ProductType::Car, &member(10_000.0), 120, 500_000.0, None);
        assert_eq!(verdict.dynamic_max_loanable, Some(500_000.0));
        assert_eq!(verdict.dynamic_max_term_months, Some(72));

        let verdict = run(ProductType::Motorcycle, &member(10_000.0), 150, 500_000.0, None);
        assert_eq!(verdict.dynamic_max_loanable, Some(150_000.0));
        assert_eq!(verdict.dynamic_max_term_months, Some(36));
    }
}
