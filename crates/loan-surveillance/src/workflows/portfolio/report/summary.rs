use super::super::domain::{parse_loan_date, risk_area_title, Loan, RiskScore};
use super::views::{LoanDetailView, PortfolioSummary, RiskAreaView, RiskBucket};
use crate::workflows::facts::RedFlagReview;

const NOT_AVAILABLE: &str = "N/A";

impl PortfolioSummary {
    /// Pure reduction over `loans`; callers choose the full or filtered set.
    pub fn from_loans(loans: &[Loan]) -> Self {
        let total_upb: f64 = loans.iter().map(|loan| loan.upb).sum();
        let (passed, total) = loans.iter().fold((0u64, 0u64), |(passed, total), loan| {
            (
                passed + u64::from(loan.compliance_score.passed()),
                total + u64::from(loan.compliance_score.total()),
            )
        });

        let percentage_compliant = if total == 0 {
            0
        } else {
            (passed as f64 / total as f64 * 100.0).round() as u32
        };

        let risk_distribution = RiskScore::ordered()
            .into_iter()
            .map(|risk_score| RiskBucket {
                risk_score,
                count: loans
                    .iter()
                    .filter(|loan| loan.risk_score == risk_score)
                    .count(),
            })
            .collect();

        Self {
            loan_count: loans.len(),
            total_upb,
            total_upb_display: format_currency(total_upb),
            percentage_compliant,
            percentage_failed: 100 - percentage_compliant,
            critical_by_risk_score: loans.iter().filter(|loan| loan.is_high_risk()).count(),
            critical_by_severity: loans
                .iter()
                .filter(|loan| loan.is_critical_severity())
                .count(),
            risk_distribution,
        }
    }
}

impl LoanDetailView {
    pub fn new(loan: Loan, review: RedFlagReview) -> Self {
        let risk_areas = loan
            .key_risk_areas
            .iter()
            .map(|tag| RiskAreaView {
                tag: tag.clone(),
                title: risk_area_title(tag),
            })
            .collect();

        Self {
            acquisition_date_display: format_date(loan.acquisition_date.as_deref()),
            commitment_date_display: format_date(loan.commitment_date.as_deref()),
            last_review_date_display: format_date(loan.last_review_date.as_deref()),
            next_review_date_display: format_date(loan.next_review_date.as_deref()),
            loan_amount_display: format_currency(loan.loan_amount),
            upb_display: format_currency(loan.upb),
            dscr_display: format_dscr(loan.dscr),
            compliance_display: loan.compliance_score.to_string(),
            risk_areas,
            review,
            loan,
        }
    }
}

/// Compact currency: `$NK` below a million, `$N.NM` below a billion, `$N.NNB` above.
/// Halves round away from zero.
pub fn format_currency(value: f64) -> String {
    if value >= 1e9 {
        format!("${:.2}B", round_to(value / 1e9, 2))
    } else if value >= 1e6 {
        format!("${:.1}M", round_to(value / 1e6, 1))
    } else {
        format!("${:.0}K", round_to(value / 1e3, 0))
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// `Jan 15, 2024`, or `N/A` for missing and unparseable dates.
pub fn format_date(value: Option<&str>) -> String {
    parse_loan_date(value)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_dscr(value: Option<f64>) -> String {
    value
        .map(|dscr| format!("{dscr:.2}x"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
