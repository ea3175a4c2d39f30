//! Loan application records and their status history

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::products::ProductType;

/// Lifecycle status of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    PendingReview,
    Approved,
    Rejected,
    /// Sub-state of Approved once proceeds are disbursed
    FundsReleased,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::PendingReview => "Pending Review",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::FundsReleased => "Funds Released",
        }
    }

    /// Whether `next` follows this status in the recognised review flow
    ///
    /// Informational only: recording a status never checks this.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Submitted, UnderReview)
                | (UnderReview, PendingReview)
                | (PendingReview, UnderReview)
                | (UnderReview, Approved)
                | (UnderReview, Rejected)
                | (PendingReview, Approved)
                | (PendingReview, Rejected)
                | (Approved, FundsReleased)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::FundsReleased)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the append-only status log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: ApplicationStatus,
    pub changed_on: NaiveDate,
    pub note: Option<String>,
}

/// A required document and whether it has been provided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    pub name: String,
    pub provided: bool,
}

/// A member's application for a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub application_id: String,
    pub member_id: String,
    pub product_type: ProductType,

    pub requested_amount: f64,
    pub approved_amount: Option<f64>,
    pub purpose: String,

    pub status: ApplicationStatus,
    pub status_history: Vec<StatusChange>,

    pub documents: Vec<DocumentItem>,
    pub submitted_on: NaiveDate,
}

impl LoanApplication {
    /// New application in Submitted status with its first history entry
    pub fn submitted(
        application_id: impl Into<String>,
        member_id: impl Into<String>,
        product_type: ProductType,
        requested_amount: f64,
        purpose: impl Into<String>,
        documents: Vec<DocumentItem>,
        submitted_on: NaiveDate,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            member_id: member_id.into(),
            product_type,
            requested_amount,
            approved_amount: None,
            purpose: purpose.into(),
            status: ApplicationStatus::Submitted,
            status_history: vec![StatusChange {
                status: ApplicationStatus::Submitted,
                changed_on: submitted_on,
                note: None,
            }],
            documents,
            submitted_on,
        }
    }

    /// Append a status change; transitions outside the usual flow are logged, not refused
    pub fn record_status(&mut self, status: ApplicationStatus, changed_on: NaiveDate, note: Option<String>) {
        if !self.status.can_transition_to(status) {
            warn!(
                "Application {}: unusual transition {} -> {}",
                self.application_id, self.status, status
            );
        }
        self.status = status;
        self.status_history.push(StatusChange { status, changed_on, note });
    }

    /// Mark approved for an amount
    pub fn approve(&mut self, amount: f64, changed_on: NaiveDate, note: Option<String>) {
        self.approved_amount = Some(amount);
        self.record_status(ApplicationStatus::Approved, changed_on, note);
    }

    pub fn mark_document_provided(&mut self, name: &str) -> bool {
        match self.documents.iter_mut().find(|d| d.name.eq_ignore_ascii_case(name)) {
            Some(doc) => {
                doc.provided = true;
                true
            }
            None => false,
        }
    }

    pub fn is_complete_documents(&self) -> bool {
        self.documents.iter().all(|d| d.provided)
    }

    pub fn missing_documents(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().filter(|d| !d.provided).map(|d| d.name.as_str())
    }
}
