use std::sync::Arc;

use super::domain::Loan;
use super::seed::seed_loans;

/// Source of the canonical loan collection so the loader can be exercised in isolation.
pub trait LoanRepository: Send + Sync {
    fn loans(&self) -> Arc<[Loan]>;

    fn find(&self, id: &str) -> Option<Loan> {
        self.loans().iter().find(|loan| loan.id == id).cloned()
    }
}

/// Immutable in-memory collection built once at startup.
#[derive(Debug, Clone)]
pub struct StaticLoanRepository {
    loans: Arc<[Loan]>,
}

impl StaticLoanRepository {
    pub fn new(loans: Vec<Loan>) -> Self {
        Self {
            loans: loans.into(),
        }
    }
}

impl Default for StaticLoanRepository {
    fn default() -> Self {
        Self::new(seed_loans())
    }
}

impl LoanRepository for StaticLoanRepository {
    fn loans(&self) -> Arc<[Loan]> {
        Arc::clone(&self.loans)
    }
}
