//! Benefits Engine CLI
//!
//! Evaluates loan eligibility and reconciles amortization ledgers from a
//! directory of CSV exports (members.csv, equity.csv, loans.csv, and
//! optionally amortization.csv and products.csv).

use anyhow::Context;
use benefits_engine::amortization::loader::load_entries;
use benefits_engine::member::{load_equity, load_loans, load_members};
use benefits_engine::{
    AmortizationFilter, EligibilityVerdict, InMemoryRepository, LoanDesk, LoanPolicy, MemberRecords, ProductType,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "benefits-engine", version, about = "Loan eligibility and amortization for fund members")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one member for one loan product
    Eligibility {
        /// Directory holding the CSV exports
        #[arg(long, default_value = "data")]
        data: PathBuf,
        #[arg(long)]
        member: String,
        #[arg(long)]
        product: ProductType,
        /// Requested amount; omit for a preview of the member's limits
        #[arg(long)]
        amount: Option<f64>,
        /// Evaluation date (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Preview one product for every member, written to CSV
    Batch {
        #[arg(long, default_value = "data")]
        data: PathBuf,
        #[arg(long)]
        product: ProductType,
        #[arg(long, default_value = "eligibility_output.csv")]
        output: PathBuf,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Reconcile a loan's amortization ledger
    Amortization {
        #[arg(long, default_value = "data")]
        data: PathBuf,
        #[arg(long)]
        loan: String,
        /// all, completedOnly, projectedOnly, last3Months, thisYear, nextYear
        #[arg(long, default_value = "all")]
        filter: AmortizationFilter,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Print the projected level-payment schedule instead
        #[arg(long)]
        projected: bool,
    },
}

/// Verdict with its reason spelled out
#[derive(Serialize)]
struct VerdictReport<'a> {
    #[serde(flatten)]
    verdict: &'a EligibilityVerdict,
    message: Option<String>,
}

/// One line of the batch output
#[derive(Serialize)]
struct BatchRow {
    member_id: String,
    eligible: bool,
    total_equity: Option<f64>,
    available_equity: Option<f64>,
    tenure_months: Option<u32>,
    max_loanable: Option<f64>,
    max_term_months: Option<u32>,
    reason: Option<String>,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn load_policy(dir: &Path) -> anyhow::Result<LoanPolicy> {
    if dir.join("products.csv").exists() {
        info!("Loading products from {}", dir.display());
        LoanPolicy::from_csv_path(dir).context("Failed to load products.csv")
    } else {
        Ok(LoanPolicy::default_policy())
    }
}

fn load_desk(dir: &Path) -> anyhow::Result<LoanDesk<InMemoryRepository>> {
    let start = Instant::now();

    let members = load_members(dir.join("members.csv")).context("Failed to load members.csv")?;
    let statements = load_equity(dir.join("equity.csv")).context("Failed to load equity.csv")?;
    let loans = load_loans(dir.join("loans.csv")).context("Failed to load loans.csv")?;

    let ledger_path = dir.join("amortization.csv");
    let entries = if ledger_path.exists() {
        load_entries(&ledger_path).context("Failed to load amortization.csv")?
    } else {
        Vec::new()
    };

    info!(
        "Loaded {} members, {} statements, {} loans, {} ledger rows in {:?}",
        members.len(),
        statements.len(),
        loans.len(),
        entries.len(),
        start.elapsed()
    );

    let repo = InMemoryRepository::with_records(members, statements, loans, entries);
    Ok(LoanDesk::new(load_policy(dir)?, repo))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_batch(desk: &LoanDesk<InMemoryRepository>, product: ProductType, output: &Path, now: NaiveDate) -> anyhow::Result<()> {
    let members = desk.repository().members();

    let rows: Vec<BatchRow> = members
        .par_iter()
        .map(|member| match desk.preview(&member.member_id, product, now) {
            Ok(verdict) => BatchRow {
                member_id: member.member_id.clone(),
                eligible: verdict.eligible,
                total_equity: Some(verdict.total_equity),
                available_equity: Some(verdict.available_equity),
                tenure_months: Some(verdict.tenure_months),
                max_loanable: verdict.dynamic_max_loanable,
                max_term_months: verdict.dynamic_max_term_months,
                reason: verdict.reason_message(),
            },
            Err(err) => {
                warn!("Member {} skipped: {}", member.member_id, err);
                BatchRow {
                    member_id: member.member_id.clone(),
                    eligible: false,
                    total_equity: None,
                    available_equity: None,
                    tenure_months: None,
                    max_loanable: None,
                    max_term_months: None,
                    reason: Some(err.to_string()),
                }
            }
        })
        .collect();

    let mut writer = csv::Writer::from_path(output).context("Unable to create output CSV")?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let eligible = rows.iter().filter(|r| r.eligible).count();
    println!("{} of {} members eligible for {}", eligible, rows.len(), product.display_name());
    println!("Results written to: {}", output.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Eligibility { data, member, product, amount, as_of } => {
            let desk = load_desk(&data)?;
            let verdict = desk.evaluate(&member, product, amount, as_of.unwrap_or_else(today))?;
            print_json(&VerdictReport {
                message: verdict.reason_message(),
                verdict: &verdict,
            })?;
        }
        Command::Batch { data, product, output, as_of } => {
            let desk = load_desk(&data)?;
            run_batch(&desk, product, &output, as_of.unwrap_or_else(today))?;
        }
        Command::Amortization { data, loan, filter, as_of, projected } => {
            let desk = load_desk(&data)?;
            if projected {
                print_json(&desk.projected_schedule(&loan)?)?;
            } else {
                print_json(&desk.amortization(&loan, filter, as_of.unwrap_or_else(today))?)?;
            }
        }
    }

    Ok(())
}
