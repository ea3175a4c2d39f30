//! Loan desk: resolves records from a repository and runs the engine
//!
//! This is the layer where missing data becomes an error. A member without
//! an equity statement is reported as [`EngineError::EquityUnavailable`]
//! rather than evaluated against zero equity.

use chrono::{Months, NaiveDate};
use log::info;

use crate::amortization::{project_schedule, reconcile_amortization, AmortizationEntry, AmortizationFilter, AmortizationView};
use crate::application::{ApplicationRequest, ApplicationStatus, LoanApplication, SubmissionOutcome};
use crate::eligibility::{compute_equity_position, compute_tenure_months, EligibilityEngine, EligibilityVerdict, EquityPosition};
use crate::error::{EngineError, Result};
use crate::member::Member;
use crate::products::{LoanPolicy, LoanProduct, ProductType};
use crate::repository::{ApplicationStore, MemberRecords};

pub struct LoanDesk<R> {
    engine: EligibilityEngine,
    repo: R,
}

impl<R: MemberRecords> LoanDesk<R> {
    pub fn new(policy: LoanPolicy, repo: R) -> Self {
        Self {
            engine: EligibilityEngine::new(policy),
            repo,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    fn member(&self, member_id: &str) -> Result<&Member> {
        self.repo
            .member(member_id)
            .ok_or_else(|| EngineError::MemberNotFound(member_id.to_string()))
    }

    fn product(&self, product_type: ProductType) -> Result<&LoanProduct> {
        self.engine
            .policy()
            .product(product_type)
            .ok_or_else(|| EngineError::ProductNotConfigured(product_type.to_string()))
    }

    /// Total, outstanding, and available equity for a member
    pub fn equity_position(&self, member_id: &str) -> Result<EquityPosition> {
        self.member(member_id)?;
        let statements = self.repo.equity_statements(member_id);
        if statements.is_empty() {
            return Err(EngineError::EquityUnavailable(member_id.to_string()));
        }
        let loans = self.repo.active_loans(member_id);
        Ok(compute_equity_position(member_id, &statements, &loans))
    }

    pub fn tenure_months(&self, member_id: &str, now: NaiveDate) -> Result<u32> {
        Ok(compute_tenure_months(self.member(member_id)?, now))
    }

    /// Evaluate a member for a product, with or without an amount
    pub fn evaluate(
        &self,
        member_id: &str,
        product_type: ProductType,
        requested_amount: Option<f64>,
        now: NaiveDate,
    ) -> Result<EligibilityVerdict> {
        let member = self.member(member_id)?;
        let product = self.product(product_type)?;
        let position = self.equity_position(member_id)?;
        let tenure = compute_tenure_months(member, now);

        Ok(self.engine.evaluate(product, member, &position, tenure, requested_amount))
    }

    /// What the member could borrow under a product
    pub fn preview(&self, member_id: &str, product_type: ProductType, now: NaiveDate) -> Result<EligibilityVerdict> {
        self.evaluate(member_id, product_type, None, now)
    }

    /// Preview every configured product for a member
    pub fn preview_all(&self, member_id: &str, now: NaiveDate) -> Result<Vec<EligibilityVerdict>> {
        self.engine
            .policy()
            .products
            .iter()
            .map(|product| self.preview(member_id, product.product_type, now))
            .collect()
    }

    /// Reconciled ledger view of one loan
    pub fn amortization(&self, loan_id: &str, filter: AmortizationFilter, now: NaiveDate) -> Result<AmortizationView> {
        if self.repo.active_loan(loan_id).is_none() {
            return Err(EngineError::LoanNotFound(loan_id.to_string()));
        }
        let entries = self.repo.amortization_entries(loan_id);
        Ok(reconcile_amortization(&entries, filter, now))
    }

    /// Level-payment schedule for a loan, starting a month after release
    pub fn projected_schedule(&self, loan_id: &str) -> Result<Vec<AmortizationEntry>> {
        let loan = self
            .repo
            .active_loan(loan_id)
            .ok_or_else(|| EngineError::LoanNotFound(loan_id.to_string()))?;
        let product = self.product(loan.product_type)?;

        let released = loan
            .date_released
            .or(loan.date_granted)
            .ok_or_else(|| EngineError::InvalidRecord(format!("{}: loan has no release date", loan_id)))?;
        let first_payment = released
            .checked_add_months(Months::new(1))
            .ok_or_else(|| EngineError::InvalidRecord(format!("{}: release date out of range", loan_id)))?;

        project_schedule(loan_id, loan.principal, product.interest_rate, loan.term_months, first_payment)
    }
}

impl<R: MemberRecords + ApplicationStore> LoanDesk<R> {
    /// Check the form, evaluate the requested amount, and record the application if eligible
    pub fn apply(&mut self, request: ApplicationRequest, now: NaiveDate) -> Result<SubmissionOutcome> {
        // An unknown member is an integration fault even when the form is incomplete
        self.member(&request.member_id)?;

        if let Err(error) = request.check_form() {
            return Ok(SubmissionOutcome::Incomplete { error });
        }

        let verdict = self.evaluate(
            &request.member_id,
            request.product_type,
            Some(request.requested_amount),
            now,
        )?;
        if !verdict.eligible {
            return Ok(SubmissionOutcome::Denied { verdict });
        }

        let application_id = format!("APP-{}-{:04}", now.format("%Y%m%d"), self.repo.count() + 1);
        let product = self.product(request.product_type)?.clone();
        let application = request.into_application(application_id, &product, now);
        self.repo.create(application.clone())?;

        info!(
            "Application {} submitted: member {}, {} for {:.2}",
            application.application_id, application.member_id, application.product_type, application.requested_amount
        );

        Ok(SubmissionOutcome::Submitted { verdict, application })
    }

    /// Append a status change to an application
    pub fn update_status(
        &mut self,
        application_id: &str,
        status: ApplicationStatus,
        now: NaiveDate,
        note: Option<String>,
    ) -> Result<LoanApplication> {
        let mut application = self.stored_application(application_id)?;
        application.record_status(status, now, note);
        self.repo.update(application.clone())?;
        Ok(application)
    }

    /// Approve an application for an amount
    pub fn approve(
        &mut self,
        application_id: &str,
        amount: f64,
        now: NaiveDate,
        note: Option<String>,
    ) -> Result<LoanApplication> {
        let mut application = self.stored_application(application_id)?;
        application.approve(amount, now, note);
        self.repo.update(application.clone())?;
        Ok(application)
    }

    fn stored_application(&self, application_id: &str) -> Result<LoanApplication> {
        self.repo
            .get(application_id)
            .cloned()
            .ok_or_else(|| EngineError::ApplicationNotFound(application_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::IntakeError;
    use crate::eligibility::Denial;
    use crate::member::{ActiveLoan, BalanceBreakdown, EquityStatement};
    use crate::repository::InMemoryRepository;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> NaiveDate {
        date(2024, 6, 10)
    }

    /// Member enrolled 14 years before `now`, with 116,200 equity and one loan
    fn desk() -> LoanDesk<InMemoryRepository> {
        let mut repo = InMemoryRepository::new();
        repo.add_member(Member::new("user1", date(2010, 6, 1), 25_000.0));
        repo.add_member(Member::new("user2", date(2024, 1, 1), 18_000.0));
        repo.add_statement(EquityStatement {
            statement_id: "eq1".to_string(),
            member_id: "user1".to_string(),
            period_start: date(2023, 1, 1),
            period_end: date(2023, 12, 31),
            as_of: date(2023, 12, 31),
            starting_balance: BalanceBreakdown::from_components(50_000.0, 40_000.0, 2_500.0, 1_500.0),
            ending_balance: BalanceBreakdown::from_components(60_000.0, 50_000.0, 3_700.0, 2_500.0),
            period_contributions: 12_000.0,
            period_withdrawals: 1_000.0,
        });
        repo.add_loan(ActiveLoan {
            loan_id: "loan1".to_string(),
            member_id: "user1".to_string(),
            loan_code: "RL2023-001".to_string(),
            product_type: ProductType::Regular,
            principal: 60_000.0,
            outstanding_balance: 45_000.75,
            outstanding_as_of: date(2024, 5, 1),
            date_granted: Some(date(2023, 1, 15)),
            date_released: Some(date(2023, 1, 20)),
            maturity_date: Some(date(2025, 1, 20)),
            term_months: 24,
            repayment_amount: Some(2_600.0),
        });
        repo.add_entry(AmortizationEntry {
            loan_id: "loan1".to_string(),
            payment_date: date(2024, 4, 20),
            school_year: Some("2023-2024".to_string()),
            principal_paid: 1_900.0,
            interest_paid: 200.0,
            remaining_balance: 45_000.75,
            is_projected: false,
            scheduled_total_amount: Some(2_600.0),
            actual_total_paid: Some(2_100.0),
        });
        LoanDesk::new(LoanPolicy::default_policy(), repo)
    }

    fn request(amount: f64) -> ApplicationRequest {
        ApplicationRequest {
            member_id: "user1".to_string(),
            product_type: ProductType::Regular,
            requested_amount: amount,
            purpose: "Home repair".to_string(),
            agreed_to_terms: true,
            attached_documents: vec!["Payslip".to_string(), "Valid ID".to_string()],
        }
    }

    #[test]
    fn test_regular_loan_end_to_end() {
        let desk = desk();

        let position = desk.equity_position("user1").unwrap();
        assert_relative_eq!(position.total_equity, 116_200.0);
        assert_relative_eq!(position.available_equity, 71_199.25, epsilon = 1e-9);
        assert_eq!(desk.tenure_months("user1", now()).unwrap(), 168);

        let verdict = desk.evaluate("user1", ProductType::Regular, Some(60_000.0), now()).unwrap();
        assert!(verdict.eligible, "{:?}", verdict.reason);
        assert_eq!(verdict.tenure_months, 168);
        assert_relative_eq!(verdict.dynamic_max_loanable.unwrap(), 71_199.25, epsilon = 1e-9);
        assert_eq!(verdict.dynamic_max_term_months, Some(60));
        assert_eq!(verdict.service_fee, Some(200.0));
    }

    #[test]
    fn test_missing_records_are_errors() {
        let desk = desk();
        assert!(matches!(
            desk.preview("ghost", ProductType::Regular, now()),
            Err(EngineError::MemberNotFound(_))
        ));
        assert!(matches!(
            desk.preview("user2", ProductType::Emergency, now()),
            Err(EngineError::EquityUnavailable(_))
        ));
        assert!(matches!(
            desk.amortization("loan9", AmortizationFilter::All, now()),
            Err(EngineError::LoanNotFound(_))
        ));
    }

    #[test]
    fn test_unconfigured_product() {
        let mut policy = LoanPolicy::default_policy();
        policy.products = crate::products::ProductCatalog::new();
        let desk = LoanDesk::new(policy, desk().repo);
        assert!(matches!(
            desk.preview("user1", ProductType::Car, now()),
            Err(EngineError::ProductNotConfigured(_))
        ));
    }

    #[test]
    fn test_preview_all_products() {
        let verdicts = desk().preview_all("user1", now()).unwrap();
        assert_eq!(verdicts.len(), 6);
        assert!(verdicts.iter().all(|v| v.eligible));
        let car = verdicts.iter().find(|v| v.product_type == ProductType::Car).unwrap();
        assert!(car.requires_office_processing);
    }

    #[test]
    fn test_apply_records_application() {
        let mut desk = desk();
        let outcome = desk.apply(request(60_000.0), now()).unwrap();

        let application = outcome.application().expect("application recorded").clone();
        assert_eq!(application.status, ApplicationStatus::Submitted);
        assert_eq!(application.status_history.len(), 1);
        assert!(application.is_complete_documents());
        assert_eq!(desk.repository().get(&application.application_id), Some(&application));

        let approved = desk.approve(&application.application_id, 60_000.0, now(), None).unwrap();
        assert_eq!(approved.status, ApplicationStatus::Approved);
        let released = desk
            .update_status(&application.application_id, ApplicationStatus::FundsReleased, now(), None)
            .unwrap();
        assert_eq!(released.status_history.len(), 3);
    }

    #[test]
    fn test_apply_denied_persists_nothing() {
        let mut desk = desk();
        let outcome = desk.apply(request(80_000.0), now()).unwrap();

        match outcome {
            SubmissionOutcome::Denied { verdict } => {
                assert!(matches!(verdict.reason, Some(Denial::ExceedsAvailableEquity { .. })));
            }
            other => panic!("expected denial, got {:?}", other),
        }
        assert!(desk.repository().for_member("user1").is_empty());
    }

    #[test]
    fn test_apply_incomplete_form() {
        let mut desk = desk();
        let mut req = request(60_000.0);
        req.agreed_to_terms = false;

        let outcome = desk.apply(req, now()).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Incomplete { error: IntakeError::TermsNotAccepted });
        assert!(outcome.verdict().is_none());
    }

    #[test]
    fn test_amortization_view() {
        let view = desk().amortization("loan1", AmortizationFilter::All, now()).unwrap();
        assert_eq!(view.total_count, 1);
        assert_eq!(view.shortfalls[0].amount, 500.0);
    }

    #[test]
    fn test_projected_schedule_starts_after_release() {
        let rows = desk().projected_schedule("loan1").unwrap();
        assert_eq!(rows.len(), 24);
        assert_eq!(rows[0].payment_date, date(2023, 2, 20));
        assert!(rows.iter().all(|r| r.is_projected));
    }
}
