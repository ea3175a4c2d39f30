//! Loan eligibility evaluation
//!
//! The evaluation runs in two stages:
//! 1. **Base checks** shared by all products (membership, equity, tenure, amount policy)
//! 2. **Product rules** for the loan type, which may reject or add limits
//!
//! Every stage is pure: records and "now" are passed in, nothing is looked up.

mod amount;
mod base;
mod equity;
mod regular;
mod rules;
mod tenure;
mod verdict;

pub use amount::{is_valid_denomination, validate_amount};
pub use base::evaluate_base;
pub use equity::{compute_equity_position, latest_statement, outstanding_total, EquityPosition};
pub use regular::{regular_tier, TenureTier, REGULAR_TENURE_TABLE};
pub use rules::{apply_product_rules, RuleContext};
pub use tenure::{compute_tenure_months, tenure_months};
pub use verdict::{Denial, DenialCategory, EligibilityVerdict};

use crate::member::Member;
use crate::products::{LoanPolicy, LoanProduct};
use log::debug;

/// Evaluates members against the products of a lending policy
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    policy: LoanPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: LoanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// Evaluate one member against one product
    ///
    /// Leave `requested_amount` empty for a preview of what the member
    /// could borrow; amount-specific checks are then skipped.
    pub fn evaluate(
        &self,
        product: &LoanProduct,
        member: &Member,
        position: &EquityPosition,
        tenure_months: u32,
        requested_amount: Option<f64>,
    ) -> EligibilityVerdict {
        let base = evaluate_base(
            product,
            member,
            position,
            tenure_months,
            requested_amount,
            self.policy.denomination,
        );

        let mut verdict = if base.eligible {
            let ctx = RuleContext {
                policy: &self.policy,
                product,
                member,
                tenure_months,
                available_equity: position.available_equity,
                requested_amount,
            };
            apply_product_rules(base, &ctx)
        } else {
            base
        };
        verdict.requires_office_processing = product.requires_office_processing();

        match &verdict.reason {
            None => debug!(
                "Member {} eligible for {}: max {:?}, term {:?}",
                member.member_id, product.product_type, verdict.dynamic_max_loanable, verdict.dynamic_max_term_months
            ),
            Some(denial) => debug!(
                "Member {} denied {}: {}",
                member.member_id, product.product_type, denial
            ),
        }

        verdict
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(LoanPolicy::default_policy())
    }
}
