//! Load amortization ledgers from amortization.csv

use super::AmortizationEntry;
use crate::error::Result;
use crate::member::loader::parse_date;
use csv::Reader;
use std::path::Path;

#[derive(Debug, serde::Deserialize)]
struct EntryRow {
    #[serde(rename = "LoanID")]
    loan_id: String,
    #[serde(rename = "PaymentDate")]
    payment_date: String,
    #[serde(rename = "SchoolYear", default)]
    school_year: String,
    #[serde(rename = "PrincipalPaid")]
    principal_paid: f64,
    #[serde(rename = "InterestPaid")]
    interest_paid: f64,
    #[serde(rename = "RemainingBalance")]
    remaining_balance: f64,
    #[serde(rename = "IsProjected")]
    is_projected: bool,
    #[serde(rename = "ScheduledTotal", default)]
    scheduled_total: Option<f64>,
    #[serde(rename = "ActualTotalPaid", default)]
    actual_total_paid: Option<f64>,
}

impl EntryRow {
    fn to_entry(self) -> Result<AmortizationEntry> {
        let school_year = Some(self.school_year.trim().to_string()).filter(|s| !s.is_empty());

        Ok(AmortizationEntry {
            loan_id: self.loan_id,
            payment_date: parse_date(&self.payment_date)?,
            school_year,
            principal_paid: self.principal_paid,
            interest_paid: self.interest_paid,
            remaining_balance: self.remaining_balance,
            is_projected: self.is_projected,
            scheduled_total_amount: self.scheduled_total,
            actual_total_paid: self.actual_total_paid,
        })
    }
}

/// Load ledger rows from any reader, keeping file order
pub fn load_entries_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<AmortizationEntry>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut entries = Vec::new();

    for result in csv_reader.deserialize() {
        let row: EntryRow = result?;
        entries.push(row.to_entry()?);
    }

    Ok(entries)
}

pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<AmortizationEntry>> {
    load_entries_from_reader(std::fs::File::open(path)?)
}
