//! Load members, equity statements, and active loans from CSV
//!
//! Expected files in a data directory: `members.csv`, `equity.csv`, `loans.csv`.

use super::{ActiveLoan, BalanceBreakdown, EquityStatement, Member};
use crate::error::{EngineError, Result};
use crate::products::ProductType;
use chrono::NaiveDate;
use csv::Reader;
use std::path::Path;

/// Date format used throughout the CSV inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)?)
}

pub(crate) fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(value).map(Some)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        other => Err(EngineError::InvalidRecord(format!("Unknown boolean: {}", other))),
    }
}

/// Raw row of members.csv
#[derive(Debug, serde::Deserialize)]
struct MemberRow {
    #[serde(rename = "MemberID")]
    member_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "DateOfMembership")]
    enrollment_date: String,
    #[serde(rename = "NetPay")]
    net_pay: f64,
    #[serde(rename = "IsActive")]
    is_active: String,
}

impl MemberRow {
    fn to_member(self) -> Result<Member> {
        Ok(Member {
            member_id: self.member_id,
            name: self.name,
            enrollment_date: parse_date(&self.enrollment_date)?,
            net_pay: self.net_pay,
            is_active: parse_bool(&self.is_active)?,
        })
    }
}

/// Raw row of equity.csv: starting and ending balances flattened into columns
#[derive(Debug, serde::Deserialize)]
struct EquityRow {
    #[serde(rename = "StatementID")]
    statement_id: String,
    #[serde(rename = "MemberID")]
    member_id: String,
    #[serde(rename = "StartDate")]
    period_start: String,
    #[serde(rename = "EndDate")]
    period_end: String,
    #[serde(rename = "AsOf")]
    as_of: String,
    #[serde(rename = "StartMemberContrib")]
    start_member_contrib: f64,
    #[serde(rename = "StartEmployerContrib")]
    start_employer_contrib: f64,
    #[serde(rename = "StartMemberEarnings")]
    start_member_earnings: f64,
    #[serde(rename = "StartEmployerEarnings")]
    start_employer_earnings: f64,
    #[serde(rename = "EndMemberContrib")]
    end_member_contrib: f64,
    #[serde(rename = "EndEmployerContrib")]
    end_employer_contrib: f64,
    #[serde(rename = "EndMemberEarnings")]
    end_member_earnings: f64,
    #[serde(rename = "EndEmployerEarnings")]
    end_employer_earnings: f64,
    #[serde(rename = "EndTotal")]
    end_total: Option<f64>,
    #[serde(rename = "Contributions", default)]
    contributions: Option<f64>,
    #[serde(rename = "Withdrawals", default)]
    withdrawals: Option<f64>,
}

impl EquityRow {
    fn to_statement(self) -> Result<EquityStatement> {
        let starting_balance = BalanceBreakdown::from_components(
            self.start_member_contrib,
            self.start_employer_contrib,
            self.start_member_earnings,
            self.start_employer_earnings,
        );
        let mut ending_balance = BalanceBreakdown::from_components(
            self.end_member_contrib,
            self.end_employer_contrib,
            self.end_member_earnings,
            self.end_employer_earnings,
        );

        // A stated total must agree with the components it summarises
        if let Some(total) = self.end_total {
            ending_balance.total = total;
            if !ending_balance.is_consistent() {
                return Err(EngineError::InvalidRecord(format!(
                    "statement {}: ending total {:.2} differs from component sum {:.2}",
                    self.statement_id,
                    total,
                    ending_balance.component_sum()
                )));
            }
        }

        Ok(EquityStatement {
            statement_id: self.statement_id,
            member_id: self.member_id,
            period_start: parse_date(&self.period_start)?,
            period_end: parse_date(&self.period_end)?,
            as_of: parse_date(&self.as_of)?,
            starting_balance,
            ending_balance,
            period_contributions: self.contributions.unwrap_or(0.0),
            period_withdrawals: self.withdrawals.unwrap_or(0.0),
        })
    }
}

/// Raw row of loans.csv
#[derive(Debug, serde::Deserialize)]
struct LoanRow {
    #[serde(rename = "LoanID")]
    loan_id: String,
    #[serde(rename = "MemberID")]
    member_id: String,
    #[serde(rename = "LoanCode")]
    loan_code: String,
    #[serde(rename = "LoanType")]
    loan_type: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "OutstandingLoan")]
    outstanding_balance: f64,
    #[serde(rename = "OutstandingLoanDate")]
    outstanding_as_of: String,
    #[serde(rename = "DateGranted", default)]
    date_granted: String,
    #[serde(rename = "DateReleased", default)]
    date_released: String,
    #[serde(rename = "MaturityDate", default)]
    maturity_date: String,
    #[serde(rename = "TermMonths")]
    term_months: u32,
    #[serde(rename = "RepaymentAmount", default)]
    repayment_amount: Option<f64>,
}

impl LoanRow {
    fn to_loan(self) -> Result<ActiveLoan> {
        let product_type: ProductType = self.loan_type.parse()?;

        Ok(ActiveLoan {
            loan_id: self.loan_id,
            member_id: self.member_id,
            loan_code: self.loan_code,
            product_type,
            principal: self.principal,
            outstanding_balance: self.outstanding_balance,
            outstanding_as_of: parse_date(&self.outstanding_as_of)?,
            date_granted: parse_optional_date(&self.date_granted)?,
            date_released: parse_optional_date(&self.date_released)?,
            maturity_date: parse_optional_date(&self.maturity_date)?,
            term_months: self.term_months,
            repayment_amount: self.repayment_amount,
        })
    }
}

/// Load members from any reader
pub fn load_members_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Member>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut members = Vec::new();

    for result in csv_reader.deserialize() {
        let row: MemberRow = result?;
        members.push(row.to_member()?);
    }

    Ok(members)
}

/// Load equity statements from any reader
pub fn load_equity_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<EquityStatement>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut statements = Vec::new();

    for result in csv_reader.deserialize() {
        let row: EquityRow = result?;
        statements.push(row.to_statement()?);
    }

    Ok(statements)
}

/// Load active loans from any reader
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ActiveLoan>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut loans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: LoanRow = result?;
        loans.push(row.to_loan()?);
    }

    Ok(loans)
}

pub fn load_members<P: AsRef<Path>>(path: P) -> Result<Vec<Member>> {
    load_members_from_reader(std::fs::File::open(path)?)
}

pub fn load_equity<P: AsRef<Path>>(path: P) -> Result<Vec<EquityStatement>> {
    load_equity_from_reader(std::fs::File::open(path)?)
}

pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<ActiveLoan>> {
    load_loans_from_reader(std::fs::File::open(path)?)
}
