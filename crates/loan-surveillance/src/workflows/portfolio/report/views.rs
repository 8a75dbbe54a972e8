use super::super::domain::{Loan, RiskScore};
use crate::workflows::facts::RedFlagReview;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBucket {
    pub risk_score: RiskScore,
    pub count: usize,
}

/// Portfolio-level statistics for one loan collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub loan_count: usize,
    pub total_upb: f64,
    pub total_upb_display: String,
    pub percentage_compliant: u32,
    pub percentage_failed: u32,
    /// Loans with a risk score of 3 or 4.
    pub critical_by_risk_score: usize,
    /// Loans whose severity is `Critical`.
    pub critical_by_severity: usize,
    pub risk_distribution: Vec<RiskBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAreaView {
    pub tag: String,
    pub title: String,
}

/// Everything the loan detail page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetailView {
    pub loan: Loan,
    pub acquisition_date_display: String,
    pub commitment_date_display: String,
    pub last_review_date_display: String,
    pub next_review_date_display: String,
    pub loan_amount_display: String,
    pub upb_display: String,
    pub dscr_display: String,
    pub compliance_display: String,
    pub risk_areas: Vec<RiskAreaView>,
    pub review: RedFlagReview,
}
