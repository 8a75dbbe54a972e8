use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::domain::Loan;
use super::filters::{apply, FilterParams, LoanFilters, LoanSort};
use super::loader::{DataSource, PortfolioLoader, PortfolioSnapshot, PortfolioState};
use super::report::{LoanDetailView, PortfolioSummary};
use super::repository::LoanRepository;
use crate::workflows::facts::{FactsLoadError, FactsSource};

/// Filtered portfolio plus summaries of the full and filtered collections.
#[derive(Debug, Clone, Serialize)]
pub struct LoanListing {
    pub data_source: DataSource,
    pub sort: LoanSort,
    pub loans: Vec<Loan>,
    pub summary: PortfolioSummary,
    pub filtered_summary: PortfolioSummary,
}

/// Service composing the facts source, the loader, and the report views.
pub struct PortfolioService<R, S> {
    loader: PortfolioLoader<R>,
    source: Arc<S>,
}

impl<R, S> PortfolioService<R, S>
where
    R: LoanRepository + 'static,
    S: FactsSource + 'static,
{
    pub fn new(repository: Arc<R>, source: Arc<S>, default_loan_id: impl Into<String>) -> Self {
        Self {
            loader: PortfolioLoader::new(repository, default_loan_id),
            source,
        }
    }

    /// Raw analysis document, errors included.
    pub fn document(&self) -> Result<Value, FactsLoadError> {
        self.source.fetch()
    }

    /// Reloads the document and returns the state this request serves.
    pub fn refresh(&self) -> PortfolioState {
        self.loader.load_state_from(self.source.as_ref())
    }

    fn snapshot_of(&self, state: &PortfolioState) -> PortfolioSnapshot {
        state
            .snapshot()
            .cloned()
            .unwrap_or_else(|| self.loader.baseline())
    }

    pub fn listing(&self, params: &FilterParams) -> LoanListing {
        let state = self.refresh();
        let loans = self.snapshot_of(&state).loans;

        let filters = LoanFilters::from_params(params);
        let sort = LoanSort::from_params(params);
        let selected = apply(&loans, &filters, &sort);

        LoanListing {
            data_source: state.data_source(),
            sort,
            summary: PortfolioSummary::from_loans(&loans),
            filtered_summary: PortfolioSummary::from_loans(&selected),
            loans: selected,
        }
    }

    pub fn detail(&self, id: &str) -> Option<LoanDetailView> {
        let snapshot = self.snapshot_of(&self.refresh());
        let loan = snapshot.find(id)?;
        Some(LoanDetailView::new(loan.clone(), snapshot.review_for(loan)))
    }
}
