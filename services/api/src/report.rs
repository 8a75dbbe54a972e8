use crate::infra::portfolio_service;
use clap::Args;
use loan_surveillance::config::AppConfig;
use loan_surveillance::error::AppError;
use loan_surveillance::workflows::portfolio::report::format_dscr;
use loan_surveillance::workflows::portfolio::{
    format_currency, DataSource, FilterParams, LoanListing, PortfolioSummary,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct PortfolioReportArgs {
    /// Analysis document to merge (defaults to APP_FACTS_PATH)
    #[arg(long)]
    pub(crate) facts: Option<PathBuf>,
    /// Case-insensitive text matched against loan number, address, city, and lender
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Exact risk score (1-4)
    #[arg(long)]
    pub(crate) risk_score: Option<String>,
    /// TLR status: completed, not-completed, or unknown
    #[arg(long)]
    pub(crate) tlr_status: Option<String>,
    /// Delegation type: Preview, PD, or Standard
    #[arg(long)]
    pub(crate) delegation_type: Option<String>,
    #[arg(long)]
    pub(crate) lender: Option<String>,
    #[arg(long)]
    pub(crate) underwriter: Option<String>,
    #[arg(long)]
    pub(crate) originator: Option<String>,
    /// Earliest acquisition month (YYYY-MM)
    #[arg(long)]
    pub(crate) acquisition_from: Option<String>,
    /// Latest acquisition month (YYYY-MM)
    #[arg(long)]
    pub(crate) acquisition_to: Option<String>,
    /// Earliest commitment month (YYYY-MM)
    #[arg(long)]
    pub(crate) commitment_from: Option<String>,
    /// Latest commitment month (YYYY-MM)
    #[arg(long)]
    pub(crate) commitment_to: Option<String>,
    /// Sort field, e.g. riskScore, severity, acquisitionDate
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub(crate) direction: Option<String>,
    /// Emit the listing as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl PortfolioReportArgs {
    fn filter_params(&self) -> FilterParams {
        FilterParams {
            search: self.search.clone(),
            risk_score: self.risk_score.clone(),
            tlr_status: self.tlr_status.clone(),
            delegation_type: self.delegation_type.clone(),
            lender: self.lender.clone(),
            underwriter: self.underwriter.clone(),
            originator: self.originator.clone(),
            acquisition_from: self.acquisition_from.clone(),
            acquisition_to: self.acquisition_to.clone(),
            commitment_from: self.commitment_from.clone(),
            commitment_to: self.commitment_to.clone(),
            sort: self.sort.clone(),
            direction: self.direction.clone(),
        }
    }
}

pub(crate) fn run_portfolio_report(args: PortfolioReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let params = args.filter_params();
    let service = portfolio_service(&config.facts, args.facts);
    let listing = service.listing(&params);

    if args.json {
        let rendered = serde_json::to_string_pretty(&listing)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
        println!("{rendered}");
    } else {
        render_listing(&listing);
    }
    Ok(())
}

pub(crate) fn render_listing(listing: &LoanListing) {
    println!("Loan portfolio report");
    match listing.data_source {
        DataSource::External => println!("Data source: analysis document merged into seed loans"),
        DataSource::Canonical => {
            println!("Data source: canonical seed loans (analysis document unavailable)")
        }
    }

    println!("\nPortfolio");
    render_summary(&listing.summary);

    println!("\nRisk distribution");
    for bucket in &listing.summary.risk_distribution {
        println!("- Score {}: {} loans", bucket.risk_score, bucket.count);
    }

    println!(
        "\nSelected loans ({}, sorted by {} {:?})",
        listing.filtered_summary.loan_count,
        listing.sort.field.key(),
        listing.sort.direction
    );
    render_summary(&listing.filtered_summary);

    if listing.loans.is_empty() {
        println!("\nNo loans match the current filters");
        return;
    }

    println!();
    for loan in &listing.loans {
        println!(
            "- {} | {} ({}, {}) | risk {} | {} | DSCR {} | UPB {} | {} | compliance {}",
            loan.loan_number,
            loan.property_name,
            loan.city,
            loan.state,
            loan.risk_score,
            loan.severity.label(),
            format_dscr(loan.dscr),
            format_currency(loan.upb),
            loan.tlr_status.map_or("unknown", |status| status.label()),
            loan.compliance_score,
        );
    }
}

fn render_summary(summary: &PortfolioSummary) {
    println!(
        "- {} loans | UPB {} | {}% compliant | {}% failed",
        summary.loan_count,
        summary.total_upb_display,
        summary.percentage_compliant,
        summary.percentage_failed
    );
    println!(
        "- {} loans at risk score 3+ | {} critical severity",
        summary.critical_by_risk_score, summary.critical_by_severity
    );
}
