use std::sync::Arc;

use super::common::*;
use crate::workflows::portfolio::domain::{ComplianceScore, TlrStatus};
use crate::workflows::portfolio::filters::FilterParams;
use crate::workflows::portfolio::loader::DataSource;
use crate::workflows::portfolio::repository::StaticLoanRepository;
use crate::workflows::portfolio::PortfolioService;

#[test]
fn listing_merges_document_into_target_loan() {
    let listing = external_service().listing(&FilterParams::default());
    assert_eq!(listing.data_source, DataSource::External);
    assert_eq!(listing.loans.len(), 8);

    let austin = listing
        .loans
        .iter()
        .find(|loan| loan.id == "1")
        .expect("target loan listed");
    assert_eq!(austin.risk_score.get(), 3);
    assert_eq!(austin.dscr, None);
    assert_eq!(austin.ltv, 62.5);
    assert_eq!(austin.upb, 40_100_000.0);
    assert_eq!(austin.tlr_status, Some(TlrStatus::Completed));
    assert_eq!(austin.compliance_score, ComplianceScore::saturating(2, 3));
    assert_eq!(
        austin.rules_outcome.income_expense,
        ComplianceScore::saturating(1, 2)
    );
    assert_eq!(austin.rules_outcome.valuation, ComplianceScore::saturating(1, 1));
}

#[test]
fn filtered_summary_tracks_selected_rows() {
    let listing = fallback_service().listing(&FilterParams {
        lender: Some("Arbor Realty".to_string()),
        ..FilterParams::default()
    });
    assert_eq!(listing.data_source, DataSource::Canonical);
    assert_eq!(listing.summary.loan_count, 8);
    assert_eq!(listing.filtered_summary.loan_count, 3);
    assert_eq!(listing.loans.len(), 3);
}

#[test]
fn detail_includes_review_only_for_target() {
    let service = external_service();
    let austin = service.detail("1").expect("detail view");
    assert_eq!(austin.review.flagged_count(), 1);
    assert_eq!(austin.dscr_display, "N/A");
    assert_eq!(austin.risk_areas[1].title, "LTV Stress");

    let tampa = service.detail("2").expect("detail view");
    assert!(tampa.review.is_empty());
    assert!(service.detail("99").is_none());
}

#[test]
fn document_is_reloaded_on_every_request() {
    let source = Arc::new(CountingSource::default());
    let service = PortfolioService::new(
        Arc::new(StaticLoanRepository::default()),
        Arc::clone(&source),
        "1",
    );

    service.listing(&FilterParams::default());
    service.detail("1");
    assert_eq!(source.fetches(), 2);
}

#[test]
fn overlapping_reloads_never_serve_an_empty_portfolio() {
    let (source, started, releases) = GatedSource::new(2);
    let service = PortfolioService::new(
        Arc::new(StaticLoanRepository::default()),
        Arc::new(source),
        "1",
    );

    std::thread::scope(|scope| {
        let older = scope.spawn(|| service.listing(&FilterParams::default()));
        assert_eq!(started.recv().expect("first fetch"), 0);
        let newer = scope.spawn(|| service.detail("1"));
        assert_eq!(started.recv().expect("second fetch"), 1);

        releases[0].send(()).expect("release older load");
        let listing = older.join().expect("older request");
        assert_eq!(listing.loans.len(), 8);
        assert_eq!(listing.summary.loan_count, 8);
        assert_eq!(listing.data_source, DataSource::External);

        releases[1].send(()).expect("release newer load");
        let detail = newer.join().expect("newer request");
        assert_eq!(detail.map(|view| view.loan.id), Some("1".to_string()));
    });
}
