pub mod domain;
pub mod filters;
pub mod loader;
pub mod merge;
pub mod report;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

pub use domain::{
    risk_area_title, ComplianceScore, DelegationType, Loan, LoanStatus, RiskScore, RulesOutcome,
    Severity, TlrStatus,
};
pub use filters::{apply, FilterParams, LoanFilters, LoanSort, MonthRange, SortDirection, SortField};
pub use loader::{
    CancellationToken, DataSource, LoadOutcome, LoadTicket, PortfolioLoader, PortfolioSnapshot,
    PortfolioState,
};
pub use merge::{merge_loan, merge_portfolio, MergeTarget};
pub use report::{format_currency, LoanDetailView, PortfolioSummary};
pub use repository::{LoanRepository, StaticLoanRepository};
pub use router::portfolio_router;
pub use seed::seed_loans;
pub use service::{LoanListing, PortfolioService};

#[cfg(test)]
mod tests;
