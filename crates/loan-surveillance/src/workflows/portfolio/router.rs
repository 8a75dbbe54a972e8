use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::filters::FilterParams;
use super::repository::LoanRepository;
use super::service::PortfolioService;
use crate::error::AppError;
use crate::workflows::facts::FactsSource;

/// Router builder exposing the analysis document and the merged portfolio.
pub fn portfolio_router<R, S>(service: Arc<PortfolioService<R, S>>) -> Router
where
    R: LoanRepository + 'static,
    S: FactsSource + 'static,
{
    Router::new()
        .route("/api/v1/facts", get(facts_handler::<R, S>))
        .route("/api/v1/loans", get(list_handler::<R, S>))
        .route("/api/v1/loans/:loan_id", get(detail_handler::<R, S>))
        .with_state(service)
}

/// Every service call reads the facts source, which may block on the filesystem.
async fn off_runtime<R, S, T, F>(
    service: Arc<PortfolioService<R, S>>,
    work: F,
) -> Result<T, AppError>
where
    R: LoanRepository + 'static,
    S: FactsSource + 'static,
    T: Send + 'static,
    F: FnOnce(&PortfolioService<R, S>) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&service))
        .await
        .map_err(AppError::from)
}

pub(crate) async fn facts_handler<R, S>(
    State(service): State<Arc<PortfolioService<R, S>>>,
) -> Response
where
    R: LoanRepository + 'static,
    S: FactsSource + 'static,
{
    let fetched = off_runtime(service, |service| service.document())
        .await
        .and_then(|fetched| fetched.map_err(AppError::from));

    match fetched {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(error) => {
            tracing::warn!(%error, "failed to serve analysis document");
            error.into_response()
        }
    }
}

pub(crate) async fn list_handler<R, S>(
    State(service): State<Arc<PortfolioService<R, S>>>,
    Query(params): Query<FilterParams>,
) -> Response
where
    R: LoanRepository + 'static,
    S: FactsSource + 'static,
{
    match off_runtime(service, move |service| service.listing(&params)).await {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn detail_handler<R, S>(
    State(service): State<Arc<PortfolioService<R, S>>>,
    Path(loan_id): Path<String>,
) -> Response
where
    R: LoanRepository + 'static,
    S: FactsSource + 'static,
{
    let id = loan_id.clone();
    match off_runtime(service, move |service| service.detail(&id)).await {
        Ok(Some(view)) => (StatusCode::OK, axum::Json(view)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "loan_not_found",
                "message": format!("no loan with id {loan_id}"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}
