//! Record access for the service layer
//!
//! The engine itself never looks anything up; these traits are how the
//! surrounding application hands it records. [`InMemoryRepository`] backs
//! the CLI (after a CSV load) and the tests.

use std::collections::HashMap;

use crate::amortization::AmortizationEntry;
use crate::application::LoanApplication;
use crate::error::{EngineError, Result};
use crate::member::{ActiveLoan, EquityStatement, Member};

/// Read access to member-owned records
pub trait MemberRecords {
    fn member(&self, member_id: &str) -> Option<&Member>;

    fn members(&self) -> Vec<&Member>;

    fn equity_statements(&self, member_id: &str) -> Vec<EquityStatement>;

    fn active_loans(&self, member_id: &str) -> Vec<ActiveLoan>;

    fn active_loan(&self, loan_id: &str) -> Option<&ActiveLoan>;

    /// Ledger rows of one loan, in ledger order
    fn amortization_entries(&self, loan_id: &str) -> Vec<AmortizationEntry>;
}

/// Create/read/update by id for loan applications
pub trait ApplicationStore {
    fn create(&mut self, application: LoanApplication) -> Result<()>;

    fn get(&self, application_id: &str) -> Option<&LoanApplication>;

    fn update(&mut self, application: LoanApplication) -> Result<()>;

    fn for_member(&self, member_id: &str) -> Vec<&LoanApplication>;

    /// Number of applications ever stored, for id generation
    fn count(&self) -> usize;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    members: HashMap<String, Member>,
    statements: Vec<EquityStatement>,
    loans: Vec<ActiveLoan>,
    entries: Vec<AmortizationEntry>,
    applications: HashMap<String, LoanApplication>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(
        members: Vec<Member>,
        statements: Vec<EquityStatement>,
        loans: Vec<ActiveLoan>,
        entries: Vec<AmortizationEntry>,
    ) -> Self {
        let mut repo = Self::new();
        for member in members {
            repo.add_member(member);
        }
        repo.statements = statements;
        repo.loans = loans;
        repo.entries = entries;
        repo
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.insert(member.member_id.clone(), member);
    }

    pub fn add_statement(&mut self, statement: EquityStatement) {
        self.statements.push(statement);
    }

    pub fn add_loan(&mut self, loan: ActiveLoan) {
        self.loans.push(loan);
    }

    pub fn add_entry(&mut self, entry: AmortizationEntry) {
        self.entries.push(entry);
    }
}

impl MemberRecords for InMemoryRepository {
    fn member(&self, member_id: &str) -> Option<&Member> {
        self.members.get(member_id)
    }

    fn members(&self) -> Vec<&Member> {
        let mut members: Vec<_> = self.members.values().collect();
        members.sort_by(|a, b| a.member_id.cmp(&b.member_id));
        members
    }

    fn equity_statements(&self, member_id: &str) -> Vec<EquityStatement> {
        self.statements.iter().filter(|s| s.member_id == member_id).cloned().collect()
    }

    fn active_loans(&self, member_id: &str) -> Vec<ActiveLoan> {
        self.loans.iter().filter(|l| l.member_id == member_id).cloned().collect()
    }

    fn active_loan(&self, loan_id: &str) -> Option<&ActiveLoan> {
        self.loans.iter().find(|l| l.loan_id == loan_id)
    }

    fn amortization_entries(&self, loan_id: &str) -> Vec<AmortizationEntry> {
        self.entries.iter().filter(|e| e.loan_id == loan_id).cloned().collect()
    }
}

impl ApplicationStore for InMemoryRepository {
    fn create(&mut self, application: LoanApplication) -> Result<()> {
        if self.applications.contains_key(&application.application_id) {
            return Err(EngineError::DuplicateApplication(application.application_id));
        }
        self.applications.insert(application.application_id.clone(), application);
        Ok(())
    }

    fn get(&self, application_id: &str) -> Option<&LoanApplication> {
        self.applications.get(application_id)
    }

    fn update(&mut self, application: LoanApplication) -> Result<()> {
        match self.applications.get_mut(&application.application_id) {
            Some(existing) => {
                *existing = application;
                Ok(())
            }
            None => Err(EngineError::ApplicationNotFound(application.application_id)),
        }
    }

    fn for_member(&self, member_id: &str) -> Vec<&LoanApplication> {
        let mut apps: Vec<_> = self.applications.values().filter(|a| a.member_id == member_id).collect();
        apps.sort_by(|a, b| a.submitted_on.cmp(&b.submitted_on).then_with(|| a.application_id.cmp(&b.application_id)));
        apps
    }

    fn count(&self) -> usize {
        self.applications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationStatus;
    use crate::products::ProductType;
    use chrono::NaiveDate;

    fn application(id: &str) -> LoanApplication {
        LoanApplication::submitted(
            id,
            "user1",
            ProductType::Emergency,
            10_000.0,
            "Medical",
            Vec::new(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn test_create_get_update() {
        let mut repo = InMemoryRepository::new();
        repo.create(application("app1")).unwrap();
        assert!(matches!(repo.create(application("app1")), Err(EngineError::DuplicateApplication(_))));

        let mut app = repo.get("app1").cloned().unwrap();
        app.record_status(ApplicationStatus::UnderReview, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), None);
        repo.update(app).unwrap();
        assert_eq!(repo.get("app1").unwrap().status, ApplicationStatus::UnderReview);

        assert!(matches!(repo.update(application("app9")), Err(EngineError::ApplicationNotFound(_))));
        assert_eq!(repo.for_member("user1").len(), 1);
        assert_eq!(repo.count(), 1);
    }
}
