//! Best-effort extraction of loan overrides from the upstream analysis document.
//!
//! The document is untrusted JSON. Every field below is pulled out by its own
//! extractor, and any shape mismatch simply leaves that field empty.

mod address;
mod mapping;
mod normalizer;
mod parser;
mod review;
mod scoring;
mod source;

pub use address::{parse_address, PropertyAddress};
pub use mapping::RuleSection;
pub use review::{RedFlagReview, ReviewItem, ReviewSection};
pub use scoring::{score_document, CategoryOutcome, ComplianceBreakdown};
pub use source::{FactsLoadError, FactsSource, FileFactsSource, StaticFactsSource};

use crate::workflows::portfolio::domain::{RiskScore, TlrStatus};
use serde::Serialize;
use serde_json::Value;

/// DSCR as reported by the document when the key is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum DscrFact {
    /// Explicitly blank or null: the canonical value must be cleared.
    Unknown,
    Value(f64),
}

/// Partial loan record recovered from an analysis document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalFacts {
    pub loan_number: Option<String>,
    pub risk_score: Option<RiskScore>,
    pub property_name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub property_type: Option<String>,
    pub units: Option<u32>,
    pub product_type: Option<String>,
    pub tlr_status: Option<TlrStatus>,
    pub dscr: Option<DscrFact>,
    pub loan_amount: Option<f64>,
    pub upb: Option<f64>,
    pub ltv: Option<f64>,
    pub address: Option<PropertyAddress>,
    pub key_risk_areas: Option<Vec<String>>,
    pub compliance: Option<ComplianceBreakdown>,
}

impl ExternalFacts {
    /// Never fails: malformed or unexpected input yields empty fields.
    pub fn from_document(document: &Value) -> Self {
        let summary = parser::section(document, "loan_summary");
        let summary_field = |key: &str| summary.and_then(|fields| fields.get(key));

        let facts = Self {
            loan_number: summary_field("loan_number").and_then(parser::parse_text),
            risk_score: summary_field("risk_score").and_then(parser::parse_risk_score),
            property_name: summary_field("property_name").and_then(parser::parse_text),
            city: summary_field("city").and_then(parser::parse_text),
            state: summary_field("state").and_then(parser::parse_text),
            property_type: summary_field("property_type").and_then(parser::parse_text),
            units: summary_field("units").and_then(parser::parse_units),
            product_type: summary_field("product_type").and_then(parser::parse_verbatim),
            tlr_status: summary_field("TLR_status").and_then(parser::parse_tlr_status),
            dscr: summary.and_then(parser::parse_dscr),
            loan_amount: summary_field("loan_amount").and_then(parser::parse_non_negative),
            upb: summary_field("upb").and_then(parser::parse_non_negative),
            ltv: extract_ltv(document),
            address: extract_address(document),
            key_risk_areas: extract_key_risk_areas(document),
            compliance: score_document(document),
        };

        tracing::debug!(
            populated = facts.populated_fields(),
            "normalized analysis document"
        );
        facts
    }

    /// Number of fields the document supplied.
    pub fn populated_fields(&self) -> usize {
        [
            self.loan_number.is_some(),
            self.risk_score.is_some(),
            self.property_name.is_some(),
            self.city.is_some(),
            self.state.is_some(),
            self.property_type.is_some(),
            self.units.is_some(),
            self.product_type.is_some(),
            self.tlr_status.is_some(),
            self.dscr.is_some(),
            self.loan_amount.is_some(),
            self.upb.is_some(),
            self.ltv.is_some(),
            self.address.is_some(),
            self.key_risk_areas.is_some(),
            self.compliance.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.populated_fields() == 0
    }
}

fn extract_ltv(document: &Value) -> Option<f64> {
    parser::section(document, "loan_summary")
        .and_then(|summary| summary.get("LTV"))
        .and_then(parser::parse_non_negative)
        .or_else(|| {
            parser::statements(document)
                .into_iter()
                .find_map(parser::ltv_from_statement)
        })
}

fn extract_address(document: &Value) -> Option<PropertyAddress> {
    parser::statements(document)
        .into_iter()
        .find_map(parse_address)
}

fn extract_key_risk_areas(document: &Value) -> Option<Vec<String>> {
    parser::section(document, "risk_insights")?
        .get("key_risk_areas")
        .and_then(parser::parse_text_list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::portfolio::domain::ComplianceScore;
    use serde_json::json;

    #[test]
    fn malformed_documents_normalize_to_empty() {
        let documents = [
            json!(null),
            json!({}),
            json!([{ "loan_summary": { "DSCR": "1.2" } }]),
            json!("loan_summary"),
            json!(42),
            json!({ "loan_summary": [], "facts_lookup": "none", "risk_insights": 7 }),
            json!({ "loan_summary": { "risk_score": "high", "units": "many", "TLR_status": "done" } }),
            json!({ "facts_lookup": { "fact_1": { "statement": null } } }),
            json!({ "risk_insights": { "key_risk_areas": ["", "   "] } }),
        ];

        for document in documents {
            let facts = ExternalFacts::from_document(&document);
            assert_eq!(facts, ExternalFacts::default(), "document: {document}");
            assert!(facts.is_empty());
        }
    }

    #[test]
    fn full_summary_is_extracted() {
        let document = json!({
            "loan_summary": {
                "loan_number": "LN-2024-0117",
                "risk_score": "3",
                "property_name": " Commerce Park Lofts ",
                "city": "Austin",
                "state": "TX",
                "property_type": "Multifamily",
                "units": "184",
                "product_type": "",
                "TLR_status": "TLR Completed",
                "DSCR": "1.12",
                "loan_amount": "41,250,000",
                "upb": 40870000,
                "LTV": "71.5%"
            },
            "risk_insights": { "key_risk_areas": ["income_expense", " dscr "] }
        });

        let facts = ExternalFacts::from_document(&document);
        assert_eq!(facts.loan_number.as_deref(), Some("LN-2024-0117"));
        assert_eq!(facts.risk_score.map(RiskScore::get), Some(3));
        assert_eq!(facts.property_name.as_deref(), Some("Commerce Park Lofts"));
        assert_eq!(facts.units, Some(184));
        assert_eq!(facts.product_type.as_deref(), Some(""));
        assert_eq!(facts.tlr_status, Some(TlrStatus::Completed));
        assert_eq!(facts.dscr, Some(DscrFact::Value(1.12)));
        assert_eq!(facts.loan_amount, Some(41_250_000.0));
        assert_eq!(facts.upb, Some(40_870_000.0));
        assert_eq!(facts.ltv, Some(71.5));
        assert_eq!(
            facts.key_risk_areas,
            Some(vec!["income_expense".to_string(), "dscr".to_string()])
        );
        assert!(facts.compliance.is_none());
    }

    #[test]
    fn one_bad_field_does_not_hide_others() {
        let document = json!({
            "loan_summary": {
                "risk_score": "7",
                "DSCR": { "value": 1.3 },
                "loan_amount": "12,000,000",
                "TLR_status": "tlr completed"
            }
        });

        let facts = ExternalFacts::from_document(&document);
        assert!(facts.risk_score.is_none());
        assert!(facts.dscr.is_none());
        assert!(facts.tlr_status.is_none());
        assert_eq!(facts.loan_amount, Some(12_000_000.0));
        assert_eq!(facts.populated_fields(), 1);
    }

    #[test]
    fn ltv_falls_back_to_statement() {
        let document = json!({
            "facts_lookup": {
                "fact_loan_summary_017": {
                    "statement": "The LTV is 62.5% based on the as-is appraised value."
                }
            }
        });
        assert_eq!(ExternalFacts::from_document(&document).ltv, Some(62.5));
    }

    #[test]
    fn structured_ltv_wins_over_statement() {
        let document = json!({
            "loan_summary": { "LTV": "58%" },
            "facts_lookup": { "fact_1": { "statement": "The LTV is 62.5% at close." } }
        });
        assert_eq!(ExternalFacts::from_document(&document).ltv, Some(58.0));
    }

    #[test]
    fn address_comes_from_first_matching_statement() {
        let document = json!({
            "facts_lookup": {
                "fact_a": { "statement": "Borrower is a single-asset entity." },
                "fact_b": { "statement": "The property is located at 1250 Commerce Blvd, Austin, TX 78701." },
                "fact_c": { "statement": "Collateral address: 9 Elm St, Reno, NV 89501." }
            }
        });
        let address = ExternalFacts::from_document(&document)
            .address
            .expect("address found");
        assert_eq!(address.street, "1250 Commerce Blvd");
        assert_eq!(address.city.as_deref(), Some("Austin"));
    }

    #[test]
    fn compliance_breakdown_rides_along() {
        let document = json!({
            "valuation_rules": {
                "categories": { "Appraisal": [{ "status": "pass" }] }
            }
        });
        let facts = ExternalFacts::from_document(&document);
        let compliance = facts.compliance.expect("breakdown present");
        assert_eq!(compliance.overall, ComplianceScore::saturating(1, 1));
    }
}
