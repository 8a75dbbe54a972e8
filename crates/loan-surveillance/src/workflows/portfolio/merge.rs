use super::domain::Loan;
use crate::workflows::facts::{DscrFact, ExternalFacts, RuleSection};

/// Which loans of the portfolio an analysis document describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeTarget {
    LoanNumber(String),
    LoanId(String),
}

impl MergeTarget {
    /// The document's own loan number wins; otherwise the configured default id.
    pub fn resolve(facts: &ExternalFacts, default_loan_id: &str) -> Self {
        match &facts.loan_number {
            Some(number) => Self::LoanNumber(number.clone()),
            None => Self::LoanId(default_loan_id.to_string()),
        }
    }

    pub fn matches(&self, loan: &Loan) -> bool {
        match self {
            Self::LoanNumber(number) => loan.loan_number.eq_ignore_ascii_case(number),
            Self::LoanId(id) => loan.id == *id,
        }
    }
}

/// Applies every field the document defined and keeps the canonical value for
/// the rest. An explicitly unknown DSCR clears the canonical ratio.
pub fn merge_loan(canonical: &Loan, facts: &ExternalFacts) -> Loan {
    let mut merged = canonical.clone();

    if let Some(score) = facts.risk_score {
        merged.risk_score = score;
    }
    if let Some(name) = &facts.property_name {
        merged.property_name = name.clone();
    }
    if let Some(property_type) = &facts.property_type {
        merged.property_type = property_type.clone();
    }
    if let Some(units) = facts.units {
        merged.units = Some(units);
    }
    if let Some(product_type) = &facts.product_type {
        merged.product_type = product_type.clone();
    }
    if let Some(tlr_status) = facts.tlr_status {
        merged.tlr_status = Some(tlr_status);
    }
    match facts.dscr {
        Some(DscrFact::Value(dscr)) => merged.dscr = Some(dscr),
        Some(DscrFact::Unknown) => merged.dscr = None,
        None => {}
    }
    if let Some(amount) = facts.loan_amount {
        merged.loan_amount = amount;
    }
    if let Some(upb) = facts.upb {
        merged.upb = upb;
    }
    if let Some(ltv) = facts.ltv {
        merged.ltv = ltv;
    }
    if let Some(areas) = &facts.key_risk_areas {
        merged.key_risk_areas = areas.clone();
    }

    if let Some(address) = &facts.address {
        merged.address = address.street.clone();
        if let Some(postal_code) = &address.postal_code {
            merged.postal_code = Some(postal_code.clone());
        }
        if let Some(city) = &address.city {
            merged.city = city.clone();
        }
        if let Some(state) = &address.state {
            merged.state = state.clone();
        }
    }
    // Explicit summary fields outrank anything recovered from a statement.
    if let Some(city) = &facts.city {
        merged.city = city.clone();
    }
    if let Some(state) = &facts.state {
        merged.state = state.clone();
    }

    if let Some(compliance) = &facts.compliance {
        merged.compliance_score = compliance.overall;
        if let Some(score) = compliance.section_score(RuleSection::IncomeExpense) {
            merged.rules_outcome.income_expense = score;
        }
        if let Some(score) = compliance.section_score(RuleSection::Valuation) {
            merged.rules_outcome.valuation = score;
        }
    }

    merged
}

/// Working copy of the portfolio with the document applied to its target.
pub fn merge_portfolio(loans: &[Loan], facts: &ExternalFacts, target: &MergeTarget) -> Vec<Loan> {
    let mut applied = 0usize;
    let merged = loans
        .iter()
        .map(|loan| {
            if target.matches(loan) {
                applied += 1;
                merge_loan(loan, facts)
            } else {
                loan.clone()
            }
        })
        .collect();

    if applied == 0 {
        tracing::warn!(merge_target = ?target, "analysis document matched no loan in the portfolio");
    } else {
        tracing::debug!(merge_target = ?target, applied, "merged analysis document into portfolio");
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::facts::PropertyAddress;
    use crate::workflows::portfolio::domain::{ComplianceScore, RiskScore, TlrStatus};
    use crate::workflows::portfolio::seed::seed_loans;
    use serde_json::json;

    fn austin() -> Loan {
        seed_loans().remove(0)
    }

    #[test]
    fn empty_facts_change_nothing() {
        let canonical = austin();
        assert_eq!(merge_loan(&canonical, &ExternalFacts::default()), canonical);
    }

    #[test]
    fn merge_is_field_independent() {
        let canonical = austin();
        let facts = ExternalFacts {
            loan_amount: Some(39_000_000.0),
            ..ExternalFacts::default()
        };

        let merged = merge_loan(&canonical, &facts);
        assert_eq!(merged.loan_amount, 39_000_000.0);
        assert_eq!(merged.city, canonical.city);
        assert_eq!(merged.dscr, canonical.dscr);
        assert_eq!(merged.compliance_score, canonical.compliance_score);
        assert_eq!(
            Loan {
                loan_amount: canonical.loan_amount,
                ..merged
            },
            canonical
        );
    }

    #[test]
    fn blank_dscr_clears_canonical_value() {
        let canonical = austin();
        assert!(canonical.dscr.is_some());
        let facts = ExternalFacts::from_document(&json!({ "loan_summary": { "DSCR": "" } }));

        assert_eq!(merge_loan(&canonical, &facts).dscr, None);
    }

    #[test]
    fn zero_dscr_is_a_value() {
        let facts = ExternalFacts {
            dscr: Some(DscrFact::Value(0.0)),
            ..ExternalFacts::default()
        };
        assert_eq!(merge_loan(&austin(), &facts).dscr, Some(0.0));
    }

    #[test]
    fn empty_product_type_overrides_to_blank() {
        let facts = ExternalFacts {
            product_type: Some(String::new()),
            ..ExternalFacts::default()
        };
        assert_eq!(merge_loan(&austin(), &facts).product_type, "");
    }

    #[test]
    fn summary_city_outranks_address_city() {
        let facts = ExternalFacts {
            city: Some("Round Rock".to_string()),
            address: Some(PropertyAddress {
                street: "1 Main St".to_string(),
                city: Some("Austin".to_string()),
                state: Some("TX".to_string()),
                postal_code: Some("78664".to_string()),
            }),
            ..ExternalFacts::default()
        };
        let merged = merge_loan(&austin(), &facts);
        assert_eq!(merged.city, "Round Rock");
        assert_eq!(merged.state, "TX");
        assert_eq!(merged.address, "1 Main St");
        assert_eq!(merged.postal_code.as_deref(), Some("78664"));
    }

    #[test]
    fn compliance_overrides_only_located_sections() {
        let canonical = austin();
        let facts = ExternalFacts::from_document(&json!({
            "valuation_rules": { "categories": { "Appraisal": [{ "status": "fail" }] } }
        }));

        let merged = merge_loan(&canonical, &facts);
        assert_eq!(merged.compliance_score, ComplianceScore::saturating(0, 1));
        assert_eq!(
            merged.rules_outcome.valuation,
            ComplianceScore::saturating(0, 1)
        );
        assert_eq!(
            merged.rules_outcome.income_expense,
            canonical.rules_outcome.income_expense
        );
    }

    #[test]
    fn reported_unknown_tlr_overrides_completed() {
        let tampa = seed_loans().remove(1);
        assert_eq!(tampa.tlr_status, Some(TlrStatus::Completed));
        let facts =
            ExternalFacts::from_document(&json!({ "loan_summary": { "TLR_status": "unknown" } }));

        assert_eq!(facts.tlr_status, Some(TlrStatus::Unknown));
        assert_eq!(merge_loan(&tampa, &facts).tlr_status, Some(TlrStatus::Unknown));
    }

    #[test]
    fn portfolio_merge_touches_only_target() {
        let loans = seed_loans();
        let facts = ExternalFacts {
            risk_score: RiskScore::new(1),
            tlr_status: Some(TlrStatus::Completed),
            ..ExternalFacts::default()
        };

        let merged = merge_portfolio(&loans, &facts, &MergeTarget::LoanId("5".to_string()));
        assert_eq!(merged.len(), loans.len());
        for (before, after) in loans.iter().zip(&merged) {
            if before.id == "5" {
                assert_eq!(after.risk_score.get(), 1);
                assert_eq!(after.tlr_status, Some(TlrStatus::Completed));
            } else {
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn target_prefers_document_loan_number() {
        let facts = ExternalFacts {
            loan_number: Some("LN-2024-0142".to_string()),
            ..ExternalFacts::default()
        };
        let target = MergeTarget::resolve(&facts, "1");
        assert_eq!(target, MergeTarget::LoanNumber("LN-2024-0142".to_string()));
        let loans = seed_loans();
        let matched: Vec<_> = loans.iter().filter(|loan| target.matches(loan)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "2");

        assert_eq!(
            MergeTarget::resolve(&ExternalFacts::default(), "1"),
            MergeTarget::LoanId("1".to_string())
        );
    }
}
