use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde_json::Value;

use super::domain::Loan;
use super::merge::{merge_portfolio, MergeTarget};
use super::repository::LoanRepository;
use crate::workflows::facts::{ExternalFacts, FactsLoadError, FactsSource, RedFlagReview};

/// Immutable view of the portfolio produced by one load cycle.
#[derive(Debug, Clone)]
pub struct PortfolioSnapshot {
    pub loans: Arc<[Loan]>,
    pub review: RedFlagReview,
    pub target: Option<MergeTarget>,
}

impl PortfolioSnapshot {
    fn canonical(loans: Arc<[Loan]>) -> Self {
        Self {
            loans,
            review: RedFlagReview::default(),
            target: None,
        }
    }

    /// Review rows belong only to the loan the document describes.
    pub fn review_for(&self, loan: &Loan) -> RedFlagReview {
        match &self.target {
            Some(target) if target.matches(loan) => self.review.clone(),
            _ => RedFlagReview::default(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&Loan> {
        self.loans.iter().find(|loan| loan.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Canonical,
    External,
}

impl DataSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::External => "external",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum PortfolioState {
    #[default]
    Unloaded,
    /// The document could not be read; canonical loans are served.
    Fallback(PortfolioSnapshot),
    External(PortfolioSnapshot),
}

impl PortfolioState {
    pub fn snapshot(&self) -> Option<&PortfolioSnapshot> {
        match self {
            Self::Unloaded => None,
            Self::Fallback(snapshot) | Self::External(snapshot) => Some(snapshot),
        }
    }

    pub fn data_source(&self) -> DataSource {
        match self {
            Self::External(_) => DataSource::External,
            Self::Unloaded | Self::Fallback(_) => DataSource::Canonical,
        }
    }
}

/// Suppresses the completion of a load whose consumer has gone away.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    token: CancellationToken,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied(DataSource),
    /// Cancelled, or a newer load was started first.
    Superseded,
}

/// Owns the working copy of the portfolio and replaces it wholesale on each load.
pub struct PortfolioLoader<R> {
    repository: Arc<R>,
    default_loan_id: String,
    generation: AtomicU64,
    state: RwLock<PortfolioState>,
}

impl<R> PortfolioLoader<R>
where
    R: LoanRepository + 'static,
{
    pub fn new(repository: Arc<R>, default_loan_id: impl Into<String>) -> Self {
        Self {
            repository,
            default_loan_id: default_loan_id.into(),
            generation: AtomicU64::new(0),
            state: RwLock::new(PortfolioState::Unloaded),
        }
    }

    pub fn begin(&self) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        LoadTicket {
            generation,
            token: CancellationToken::default(),
        }
    }

    /// Sole state transition. Failures fall back to canonical loans.
    pub fn complete(
        &self,
        ticket: &LoadTicket,
        fetched: Result<Value, FactsLoadError>,
    ) -> LoadOutcome {
        self.settle(ticket, fetched).0
    }

    pub fn load_from<S>(&self, source: &S) -> LoadOutcome
    where
        S: FactsSource + ?Sized,
    {
        let ticket = self.begin();
        self.complete(&ticket, source.fetch())
    }

    /// Loads `source` and returns the state a caller should serve. Never `Unloaded`:
    /// a superseded load serves its own result until a newer one is installed.
    pub fn load_state_from<S>(&self, source: &S) -> PortfolioState
    where
        S: FactsSource + ?Sized,
    {
        let ticket = self.begin();
        let (outcome, built) = self.settle(&ticket, source.fetch());
        if let LoadOutcome::Applied(data_source) = outcome {
            tracing::debug!(data_source = data_source.label(), "portfolio refreshed");
        }

        match self.state() {
            PortfolioState::Unloaded => built,
            installed => installed,
        }
    }

    /// Canonical loans with no document applied.
    pub fn baseline(&self) -> PortfolioSnapshot {
        PortfolioSnapshot::canonical(self.repository.loans())
    }

    fn settle(
        &self,
        ticket: &LoadTicket,
        fetched: Result<Value, FactsLoadError>,
    ) -> (LoadOutcome, PortfolioState) {
        if ticket.token.is_cancelled() {
            tracing::debug!(generation = ticket.generation, "discarding cancelled load");
            return (LoadOutcome::Superseded, PortfolioState::Fallback(self.baseline()));
        }

        let next = match fetched {
            Ok(document) => PortfolioState::External(self.build_snapshot(&document)),
            Err(error) => {
                tracing::warn!(%error, "analysis document unavailable; serving canonical loans");
                PortfolioState::Fallback(self.baseline())
            }
        };

        // Generation is compared under the write lock.
        let mut state = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if self.generation.load(Ordering::Acquire) != ticket.generation {
            tracing::debug!(generation = ticket.generation, "discarding superseded load");
            return (LoadOutcome::Superseded, next);
        }

        *state = next.clone();
        (LoadOutcome::Applied(next.data_source()), next)
    }

    pub fn state(&self) -> PortfolioState {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn build_snapshot(&self, document: &Value) -> PortfolioSnapshot {
        let facts = ExternalFacts::from_document(document);
        let target = MergeTarget::resolve(&facts, &self.default_loan_id);
        let loans = merge_portfolio(&self.repository.loans(), &facts, &target);

        PortfolioSnapshot {
            loans: loans.into(),
            review: RedFlagReview::from_document(document),
            target: Some(target),
        }
    }
}
