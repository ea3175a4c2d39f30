//! Eligibility verdicts and denial reasons

use super::equity::EquityPosition;
use crate::products::ProductType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad class of a denial, deciding who can fix it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialCategory {
    /// A membership, equity, or product rule is unmet
    EligibilityDenied,
    /// The requested amount is malformed or out of range
    AmountInvalid,
}

/// Why an application was turned down, with the figures behind it
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Denial {
    #[error("membership is not active")]
    MemberInactive,

    #[error("total equity of {total:.2} is below the {required:.2} required for this loan")]
    InsufficientEquity { total: f64, required: f64 },

    #[error("no equity is available for new borrowing (available equity {available:.2})")]
    NoAvailableEquity { available: f64 },

    #[error("membership tenure of {months} months is below the {required} months required")]
    InsufficientTenure { months: u32, required: u32 },

    #[error("net pay of {net_pay:.2} is below the {required:.2} minimum")]
    InsufficientNetPay { net_pay: f64, required: f64 },

    #[error("amount {amount:.2} must be a positive multiple of {denomination:.0}")]
    InvalidDenomination { amount: f64, denomination: f64 },

    #[error("amount {amount:.2} exceeds available equity of {available:.2} by {shortfall:.2}")]
    ExceedsAvailableEquity { amount: f64, available: f64, shortfall: f64 },

    #[error("amount {amount:.2} is below the minimum of {minimum:.2}")]
    BelowMinimum { amount: f64, minimum: f64 },

    #[error("amount {amount:.2} is above the maximum of {maximum:.2}")]
    AboveMaximum { amount: f64, maximum: f64 },

    #[error("amount {amount:.2} exceeds the {cap:.2} limit for {tenure_months} months of membership")]
    ExceedsTenureCap { amount: f64, cap: f64, tenure_months: u32 },

    #[error("amount {amount:.2} must be exactly {required:.2}")]
    FixedAmountRequired { amount: f64, required: f64 },

    #[error("available equity of {available:.2} cannot cover the fixed loan amount of {required:.2}")]
    FixedAmountUnavailable { required: f64, available: f64 },
}

impl Denial {
    pub fn category(&self) -> DenialCategory {
        match self {
            Denial::InvalidDenomination { .. }
            | Denial::ExceedsAvailableEquity { .. }
            | Denial::BelowMinimum { .. }
            | Denial::AboveMaximum { .. }
            | Denial::ExceedsTenureCap { .. }
            | Denial::FixedAmountRequired { .. } => DenialCategory::AmountInvalid,
            Denial::MemberInactive
            | Denial::InsufficientEquity { .. }
            | Denial::NoAvailableEquity { .. }
            | Denial::InsufficientTenure { .. }
            | Denial::InsufficientNetPay { .. }
            | Denial::FixedAmountUnavailable { .. } => DenialCategory::EligibilityDenied,
        }
    }
}

/// Outcome of evaluating one member against one loan product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub product_type: ProductType,
    pub eligible: bool,

    /// First rule that failed, when ineligible
    pub reason: Option<Denial>,

    pub total_equity: f64,
    pub outstanding_total: f64,
    pub available_equity: f64,
    pub tenure_months: u32,

    /// Amount evaluated, or None for a preview
    pub requested_amount: Option<f64>,

    /// Largest amount grantable to this member
    pub dynamic_max_loanable: Option<f64>,

    /// Longest term grantable to this member, in months
    pub dynamic_max_term_months: Option<u32>,

    /// Flat fee withheld from proceeds (Regular only)
    pub service_fee: Option<f64>,

    /// Requested amount less the service fee
    pub net_proceeds: Option<f64>,

    /// Cap comes from a placeholder rule pending the product's tenure table
    pub provisional_cap: bool,

    /// Loan must be completed at the office even when eligible
    pub requires_office_processing: bool,
}

impl EligibilityVerdict {
    /// A passing verdict carrying the supporting figures
    pub fn approved(
        product_type: ProductType,
        position: &EquityPosition,
        tenure_months: u32,
        requested_amount: Option<f64>,
    ) -> Self {
        Self {
            product_type,
            eligible: true,
            reason: None,
            total_equity: position.total_equity,
            outstanding_total: position.outstanding_total,
            available_equity: position.available_equity,
            tenure_months,
            requested_amount,
            dynamic_max_loanable: None,
            dynamic_max_term_months: None,
            service_fee: None,
            net_proceeds: None,
            provisional_cap: false,
            requires_office_processing: false,
        }
    }

    /// Downgrade to ineligible; limits computed so far are dropped
    pub fn deny(mut self, reason: Denial) -> Self {
        self.eligible = false;
        self.reason = Some(reason);
        self.dynamic_max_loanable = None;
        self.dynamic_max_term_months = None;
        self.service_fee = None;
        self.net_proceeds = None;
        self
    }

    pub fn reason_message(&self) -> Option<String> {
        self.reason.as_ref().map(|r| r.to_string())
    }

    pub fn denial_category(&self) -> Option<DenialCategory> {
        self.reason.as_ref().map(Denial::category)
    }
}
