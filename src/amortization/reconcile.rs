//! Filtered, read-only views of a loan's amortization ledger

use super::entry::AmortizationEntry;
use crate::error::EngineError;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which rows of the ledger to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmortizationFilter {
    #[default]
    All,
    CompletedOnly,
    ProjectedOnly,
    /// Payment dates from three calendar months ago up to today
    Last3Months,
    ThisYear,
    NextYear,
}

impl AmortizationFilter {
    pub fn matches(&self, entry: &AmortizationEntry, now: NaiveDate) -> bool {
        let date = entry.payment_date;
        match self {
            AmortizationFilter::All => true,
            AmortizationFilter::CompletedOnly => !entry.is_projected,
            AmortizationFilter::ProjectedOnly => entry.is_projected,
            AmortizationFilter::Last3Months => {
                let start = now.checked_sub_months(Months::new(3)).unwrap_or(NaiveDate::MIN);
                date >= start && date <= now
            }
            AmortizationFilter::ThisYear => date.year() == now.year(),
            AmortizationFilter::NextYear => date.year() == now.year() + 1,
        }
    }
}

impl FromStr for AmortizationFilter {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "all" => Ok(AmortizationFilter::All),
            "completed" | "completedonly" => Ok(AmortizationFilter::CompletedOnly),
            "projected" | "projectedonly" => Ok(AmortizationFilter::ProjectedOnly),
            "last3months" => Ok(AmortizationFilter::Last3Months),
            "thisyear" => Ok(AmortizationFilter::ThisYear),
            "nextyear" => Ok(AmortizationFilter::NextYear),
            _ => Err(EngineError::InvalidRecord(format!("Unknown amortization filter: {}", s))),
        }
    }
}

/// A completed period where less was collected than scheduled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    pub payment_date: NaiveDate,
    pub scheduled_total_amount: f64,
    pub actual_total_paid: f64,
    pub amount: f64,
}

/// A ledger row with its reconciliation flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledEntry {
    #[serde(flatten)]
    pub entry: AmortizationEntry,
    pub shortfall: Option<f64>,
}

/// Result of reconciling a ledger under one filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationView {
    pub filter: AmortizationFilter,
    pub entries: Vec<ReconciledEntry>,
    pub shortfalls: Vec<Shortfall>,

    pub completed_count: usize,
    pub projected_count: usize,
    pub total_count: usize,

    pub total_principal_paid: f64,
    pub total_interest_paid: f64,
    pub total_shortfall: f64,
}

impl AmortizationView {
    pub fn has_shortfall(&self) -> bool {
        !self.shortfalls.is_empty()
    }
}

/// Filter a ledger and flag shortfalls; the input rows are left untouched
pub fn reconcile_amortization(
    entries: &[AmortizationEntry],
    filter: AmortizationFilter,
    now: NaiveDate,
) -> AmortizationView {
    let mut view = AmortizationView {
        filter,
        entries: Vec::new(),
        shortfalls: Vec::new(),
        completed_count: 0,
        projected_count: 0,
        total_count: 0,
        total_principal_paid: 0.0,
        total_interest_paid: 0.0,
        total_shortfall: 0.0,
    };

    for entry in entries.iter().filter(|e| filter.matches(e, now)) {
        let shortfall = entry.shortfall();

        if entry.is_projected {
            view.projected_count += 1;
        } else {
            view.completed_count += 1;
            view.total_principal_paid += entry.principal_paid;
            view.total_interest_paid += entry.interest_paid;
        }

        if let (Some(amount), Some(scheduled), Some(actual)) =
            (shortfall, entry.scheduled_total_amount, entry.actual_total_paid)
        {
            view.total_shortfall += amount;
            view.shortfalls.push(Shortfall {
                payment_date: entry.payment_date,
                scheduled_total_amount: scheduled,
                actual_total_paid: actual,
                amount,
            });
        }

        view.entries.push(ReconciledEntry { entry: entry.clone(), shortfall });
    }

    view.total_count = view.entries.len();
    view
}
