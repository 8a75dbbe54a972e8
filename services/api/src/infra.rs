use loan_surveillance::config::FactsConfig;
use loan_surveillance::workflows::facts::FileFactsSource;
use loan_surveillance::workflows::portfolio::{PortfolioService, StaticLoanRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type FilePortfolioService = PortfolioService<StaticLoanRepository, FileFactsSource>;

/// Seed portfolio backed by the analysis document at `facts_path`, or the configured path.
pub(crate) fn portfolio_service(
    config: &FactsConfig,
    facts_path: Option<PathBuf>,
) -> Arc<FilePortfolioService> {
    let path = facts_path.unwrap_or_else(|| config.path.clone());
    Arc::new(PortfolioService::new(
        Arc::new(StaticLoanRepository::default()),
        Arc::new(FileFactsSource::new(path)),
        config.default_loan_id.clone(),
    ))
}
