mod summary;
pub mod views;

pub use summary::{format_currency, format_date, format_dscr};
pub use views::{LoanDetailView, PortfolioSummary, RiskAreaView, RiskBucket};
