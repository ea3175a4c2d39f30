//! Application intake: form checks ahead of the eligibility evaluation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::data::{DocumentItem, LoanApplication};
use crate::eligibility::EligibilityVerdict;
use crate::products::{LoanProduct, ProductType};

/// What a member submits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub member_id: String,
    pub product_type: ProductType,
    pub requested_amount: f64,
    pub purpose: String,
    pub agreed_to_terms: bool,

    /// Names of documents attached with the submission
    #[serde(default)]
    pub attached_documents: Vec<String>,
}

/// Form problems the member must fix before evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum IntakeError {
    #[error("a purpose for the loan is required")]
    MissingPurpose,

    #[error("the loan terms must be accepted")]
    TermsNotAccepted,
}

/// Result of submitting an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Form incomplete; nothing evaluated
    Incomplete { error: IntakeError },

    /// Evaluated and ineligible; nothing persisted
    Denied { verdict: EligibilityVerdict },

    /// Evaluated, eligible, and recorded as a new application
    Submitted {
        verdict: EligibilityVerdict,
        application: LoanApplication,
    },
}

impl SubmissionOutcome {
    pub fn application(&self) -> Option<&LoanApplication> {
        match self {
            SubmissionOutcome::Submitted { application, .. } => Some(application),
            _ => None,
        }
    }

    pub fn verdict(&self) -> Option<&EligibilityVerdict> {
        match self {
            SubmissionOutcome::Denied { verdict } | SubmissionOutcome::Submitted { verdict, .. } => Some(verdict),
            SubmissionOutcome::Incomplete { .. } => None,
        }
    }
}

impl ApplicationRequest {
    pub fn check_form(&self) -> Result<(), IntakeError> {
        if self.purpose.trim().is_empty() {
            return Err(IntakeError::MissingPurpose);
        }
        if !self.agreed_to_terms {
            return Err(IntakeError::TermsNotAccepted);
        }
        Ok(())
    }

    /// Product's required documents, ticked off against what was attached
    pub fn document_checklist(&self, product: &LoanProduct) -> Vec<DocumentItem> {
        product
            .required_documents
            .iter()
            .map(|name| DocumentItem {
                name: name.clone(),
                provided: self.attached_documents.iter().any(|a| a.eq_ignore_ascii_case(name)),
            })
            .collect()
    }

    /// Build the application record for an eligible request
    pub fn into_application(
        self,
        application_id: String,
        product: &LoanProduct,
        submitted_on: chrono::NaiveDate,
    ) -> LoanApplication {
        let documents = self.document_checklist(product);
        LoanApplication::submitted(
            application_id,
            self.member_id,
            self.product_type,
            self.requested_amount,
            self.purpose.trim(),
            documents,
            submitted_on,
        )
    }
}
