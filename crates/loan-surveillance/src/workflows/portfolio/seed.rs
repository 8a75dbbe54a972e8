use super::domain::{
    ComplianceScore, DelegationType, Loan, LoanStatus, RiskScore, RulesOutcome, Severity,
    TlrStatus,
};

/// Static portfolio the dashboard renders before any analysis document is applied.
pub fn seed_loans() -> Vec<Loan> {
    vec![
        Loan {
            id: "1".to_string(),
            loan_number: "LN-2024-0117".to_string(),
            property_name: "Commerce Park Lofts".to_string(),
            address: "1250 Commerce Blvd".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            postal_code: Some("78701".to_string()),
            property_type: "Multifamily".to_string(),
            units: Some(184),
            product_type: "Conventional".to_string(),
            lender: "Greystone Capital".to_string(),
            underwriter: "Maria Chen".to_string(),
            originator: "David Park".to_string(),
            acquisition_date: Some("2024-01-15".to_string()),
            commitment_date: Some("2023-12-04".to_string()),
            last_review_date: Some("2024-06-30".to_string()),
            next_review_date: Some("2024-12-31".to_string()),
            delegation_type: DelegationType::Pd,
            status: LoanStatus::Fail,
            severity: Severity::Critical,
            tlr_status: Some(TlrStatus::NotCompleted),
            loan_amount: 41_250_000.0,
            upb: 40_870_000.0,
            risk_score: RiskScore::saturating(4),
            flag_percentage: 68.0,
            dscr: Some(1.08),
            ltv: 71.5,
            occupancy: 86.0,
            compliance_score: ComplianceScore::saturating(5, 9),
            rules_outcome: RulesOutcome {
                income_expense: ComplianceScore::saturating(2, 5),
                valuation: ComplianceScore::saturating(3, 4),
            },
            rules: vec![
                "Trailing-12 NOI below underwritten NOI by more than 10%".to_string(),
                "Rent roll occupancy diverges from operating statement".to_string(),
            ],
            ai_explanation: "Operating income trails underwriting and coverage sits near breakeven."
                .to_string(),
            critical_risk_summary: "DSCR of 1.08x leaves little cushion against expense growth."
                .to_string(),
            key_risk_areas: vec!["income_expense".to_string(), "dscr".to_string()],
        },
        Loan {
            id: "2".to_string(),
            loan_number: "LN-2024-0142".to_string(),
            property_name: "Harbor View Apartments".to_string(),
            address: "88 Harbor Way".to_string(),
            city: "Tampa".to_string(),
            state: "FL".to_string(),
            postal_code: Some("33602".to_string()),
            property_type: "Multifamily".to_string(),
            units: Some(212),
            product_type: "Affordable".to_string(),
            lender: "Greystone Capital".to_string(),
            underwriter: "James Rivera".to_string(),
            originator: "Sarah Klein".to_string(),
            acquisition_date: Some("2024-02-20".to_string()),
            commitment_date: Some("2024-01-11".to_string()),
            last_review_date: Some("2024-07-15".to_string()),
            next_review_date: Some("2025-01-15".to_string()),
            delegation_type: DelegationType::Standard,
            status: LoanStatus::Pass,
            severity: Severity::Low,
            tlr_status: Some(TlrStatus::Completed),
            loan_amount: 27_600_000.0,
            upb: 27_115_000.0,
            risk_score: RiskScore::saturating(2),
            flag_percentage: 12.0,
            dscr: Some(1.46),
            ltv: 62.0,
            occupancy: 95.0,
            compliance_score: ComplianceScore::saturating(8, 9),
            rules_outcome: RulesOutcome {
                income_expense: ComplianceScore::saturating(5, 5),
                valuation: ComplianceScore::saturating(3, 4),
            },
            rules: vec!["Appraisal older than 12 months at commitment".to_string()],
            ai_explanation: "Stable operations with coverage comfortably above policy minimums."
                .to_string(),
            critical_risk_summary: "No critical findings.".to_string(),
            key_risk_areas: vec!["valuation".to_string()],
        },
        Loan {
            id: "3".to_string(),
            loan_number: "LN-2023-0988".to_string(),
            property_name: "Riverside Commons".to_string(),
            address: "4100 Riverside Dr".to_string(),
            city: "Columbus".to_string(),
            state: "OH".to_string(),
            postal_code: Some("43221".to_string()),
            property_type: "Seniors Housing".to_string(),
            units: Some(96),
            product_type: "Seniors".to_string(),
            lender: "Arbor Realty".to_string(),
            underwriter: "Maria Chen".to_string(),
            originator: "Luis Ortega".to_string(),
            acquisition_date: Some("2023-11-08".to_string()),
            commitment_date: Some("2023-10-02".to_string()),
            last_review_date: Some("2024-05-01".to_string()),
            next_review_date: Some("2024-11-01".to_string()),
            delegation_type: DelegationType::Preview,
            status: LoanStatus::Waiver,
            severity: Severity::High,
            tlr_status: Some(TlrStatus::Unknown),
            loan_amount: 18_900_000.0,
            upb: 18_420_000.0,
            risk_score: RiskScore::saturating(3),
            flag_percentage: 44.0,
            dscr: Some(1.21),
            ltv: 74.0,
            occupancy: 89.0,
            compliance_score: ComplianceScore::saturating(6, 9),
            rules_outcome: RulesOutcome {
                income_expense: ComplianceScore::saturating(4, 5),
                valuation: ComplianceScore::saturating(2, 4),
            },
            rules: vec![
                "LTV above delegated maximum for seniors product".to_string(),
                "Waiver granted for comparable sales outside market radius".to_string(),
            ],
            ai_explanation: "Leverage is elevated for the asset class; a waiver covers valuation support."
                .to_string(),
            critical_risk_summary: "Valuation relies on waived comparables.".to_string(),
            key_risk_areas: vec!["valuation".to_string(), "ltv".to_string()],
        },
        Loan {
            id: "4".to_string(),
            loan_number: "LN-2024-0203".to_string(),
            property_name: "Maple Grove Townhomes".to_string(),
            address: "512 Maple Grove Ln".to_string(),
            city: "Des Moines".to_string(),
            state: "IA".to_string(),
            postal_code: Some("50309".to_string()),
            property_type: "Multifamily".to_string(),
            units: Some(64),
            product_type: "Small Balance".to_string(),
            lender: "Walker & Dunlop".to_string(),
            underwriter: "Priya Natarajan".to_string(),
            originator: "David Park".to_string(),
            acquisition_date: Some("2024-03-28".to_string()),
            commitment_date: Some("2024-02-26".to_string()),
            last_review_date: Some("2024-08-12".to_string()),
            next_review_date: Some("2025-02-12".to_string()),
            delegation_type: DelegationType::Pd,
            status: LoanStatus::Pass,
            severity: Severity::Medium,
            tlr_status: None,
            loan_amount: 6_750_000.0,
            upb: 6_690_000.0,
            risk_score: RiskScore::saturating(1),
            flag_percentage: 5.0,
            dscr: Some(1.62),
            ltv: 58.5,
            occupancy: 97.0,
            compliance_score: ComplianceScore::saturating(9, 9),
            rules_outcome: RulesOutcome {
                income_expense: ComplianceScore::saturating(5, 5),
                valuation: ComplianceScore::saturating(4, 4),
            },
            rules: Vec::new(),
            ai_explanation: "All income, expense and valuation checks pass.".to_string(),
            critical_risk_summary: "No critical findings.".to_string(),
            key_risk_areas: Vec::new(),
        },
        Loan {
            id: "5".to_string(),
            loan_number: "LN-2024-0251".to_string(),
            property_name: "Summit Ridge Plaza".to_string(),
            address: "2900 Summit Ridge Pkwy".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            postal_code: Some("80205".to_string()),
            property_type: "Mixed Use".to_string(),
            units: Some(140),
            product_type: "Conventional".to_string(),
            lender: "Arbor Realty".to_string(),
            underwriter: "James Rivera".to_string(),
            originator: "Sarah Klein".to_string(),
            acquisition_date: Some("2024-04-17".to_string()),
            commitment_date: Some("2024-03-19".to_string()),
            last_review_date: Some("2024-09-03".to_string()),
            next_review_date: None,
            delegation_type: DelegationType::Standard,
            status: LoanStatus::Fail,
            severity: Severity::Critical,
            tlr_status: Some(TlrStatus::NotCompleted),
            loan_amount: 52_300_000.0,
            upb: 51_980_000.0,
            risk_score: RiskScore::saturating(4),
            flag_percentage: 77.0,
            dscr: None,
            ltv: 79.0,
            occupancy: 81.0,
            compliance_score: ComplianceScore::saturating(3, 9),
            rules_outcome: RulesOutcome {
                income_expense: ComplianceScore::saturating(1, 5),
                valuation: ComplianceScore::saturating(2, 4),
            },
            rules: vec![
                "Operating statements missing for the trailing two quarters".to_string(),
                "Commercial component exceeds 20% of gross potential income".to_string(),
            ],
            ai_explanation: "Coverage cannot be computed without current operating statements."
                .to_string(),
            critical_risk_summary: "DSCR unavailable and leverage near policy ceiling.".to_string(),
            key_risk_areas: vec![
                "income_expense".to_string(),
                "ltv".to_string(),
                "tlr".to_string(),
            ],
        },
        Loan {
            id: "6".to_string(),
            loan_number: "LN-2023-0874".to_string(),
            property_name: "Oak Hollow Estates".to_string(),
            address: "77 Oak Hollow Rd".to_string(),
            city: "Raleigh".to_string(),
            state: "NC".to_string(),
            postal_code: None,
            property_type: "Manufactured Housing".to_string(),
            units: Some(220),
            product_type: "MHC".to_string(),
            lender: "Walker & Dunlop".to_string(),
            underwriter: "Priya Natarajan".to_string(),
            originator: "Luis Ortega".to_string(),
            acquisition_date: Some("2023-09-14".to_string()),
            commitment_date: Some("not recorded".to_string()),
            last_review_date: Some("2024-03-22".to_string()),
            next_review_date: Some("2024-09-22".to_string()),
            delegation_type: DelegationType::Preview,
            status: LoanStatus::Pass,
            severity: Severity::Medium,
            tlr_status: Some(TlrStatus::Completed),
            loan_amount: 12_400_000.0,
            upb: 11_960_000.0,
            risk_score: RiskScore::saturating(2),
            flag_percentage: 21.0,
            dscr: Some(1.33),
            ltv: 66.0,
            occupancy: 92.0,
            compliance_score: ComplianceScore::saturating(7, 9),
            rules_outcome: RulesOutcome {
                income_expense: ComplianceScore::saturating(4, 5),
                valuation: ComplianceScore::saturating(3, 4),
            },
            rules: vec!["Expense ratio below market benchmark".to_string()],
            ai_explanation: "Expenses look light relative to comparable communities.".to_string(),
            critical_risk_summary: "No critical findings.".to_string(),
            key_risk_areas: vec!["income_expense".to_string()],
        },
        Loan {
            id: "7".to_string(),
            loan_number: "LN-2024-0309".to_string(),
            property_name: "Lakeshore Senior Living".to_string(),
            address: "1600 Lakeshore Dr".to_string(),
            city: "Chicago".to_string(),
            state: "IL".to_string(),
            postal_code: Some("60611".to_string()),
            property_type: "Seniors Housing".to_string(),
            units: Some(128),
            product_type: "Seniors".to_string(),
            lender: "Greystone Capital".to_string(),
            underwriter: "Maria Chen".to_string(),
            originator: "Sarah Klein".to_string(),
            acquisition_date: Some("2024-05-09".to_string()),
            commitment_date: Some("2024-04-01".to_string()),
            last_review_date: None,
            next_review_date: Some("2024-11-09".to_string()),
            delegation_type: DelegationType::Pd,
            status: LoanStatus::Waiver,
            severity: Severity::High,
            tlr_status: Some(TlrStatus::NotCompleted),
            loan_amount: 33_800_000.0,
            upb: 33_800_000.0,
            risk_score: RiskScore::saturating(3),
            flag_percentage: 39.0,
            dscr: Some(1.17),
            ltv: 69.0,
            occupancy: 84.0,
            compliance_score: ComplianceScore::saturating(6, 9),
            rules_outcome: RulesOutcome {
                income_expense: ComplianceScore::saturating(3, 5),
                valuation: ComplianceScore::saturating(3, 4),
            },
            rules: vec!["Lease-up occupancy below stabilization threshold".to_string()],
            ai_explanation: "Occupancy is still ramping and coverage depends on lease-up."
                .to_string(),
            critical_risk_summary: "Stabilization risk while occupancy remains below 85%."
                .to_string(),
            key_risk_areas: vec!["occupancy".to_string(), "dscr".to_string()],
        },
        Loan {
            id: "8".to_string(),
            loan_number: "LN-2024-0336".to_string(),
            property_name: "Cedar Point Flats".to_string(),
            address: "930 Cedar Point Ave".to_string(),
            city: "Boise".to_string(),
            state: "ID".to_string(),
            postal_code: Some("83702".to_string()),
            property_type: "Multifamily".to_string(),
            units: Some(72),
            product_type: "Small Balance".to_string(),
            lender: "Arbor Realty".to_string(),
            underwriter: "James Rivera".to_string(),
            originator: "David Park".to_string(),
            acquisition_date: Some("2024-06-21".to_string()),
            commitment_date: Some("2024-05-20".to_string()),
            last_review_date: Some("2024-09-30".to_string()),
            next_review_date: Some("2025-03-30".to_string()),
            delegation_type: DelegationType::Standard,
            status: LoanStatus::Pass,
            severity: Severity::Low,
            tlr_status: Some(TlrStatus::Completed),
            loan_amount: 8_150_000.0,
            upb: 8_020_000.0,
            risk_score: RiskScore::saturating(1),
            flag_percentage: 0.0,
            dscr: Some(0.0),
            ltv: 55.0,
            occupancy: 98.0,
            compliance_score: ComplianceScore::saturating(9, 9),
            rules_outcome: RulesOutcome {
                income_expense: ComplianceScore::saturating(5, 5),
                valuation: ComplianceScore::saturating(4, 4),
            },
            rules: Vec::new(),
            ai_explanation: "New acquisition; coverage reported as 0.00x pending first statements."
                .to_string(),
            critical_risk_summary: "No critical findings.".to_string(),
            key_risk_areas: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_and_numbers_are_unique() {
        let loans = seed_loans();
        let ids: HashSet<_> = loans.iter().map(|loan| loan.id.as_str()).collect();
        let numbers: HashSet<_> = loans.iter().map(|loan| loan.loan_number.as_str()).collect();
        assert_eq!(ids.len(), loans.len());
        assert_eq!(numbers.len(), loans.len());
    }

    #[test]
    fn seed_scores_respect_invariants() {
        for loan in seed_loans() {
            assert!(loan.compliance_score.passed() <= loan.compliance_score.total());
            assert!(loan.rules_outcome.income_expense.passed() <= loan.rules_outcome.income_expense.total());
            assert!(loan.rules_outcome.valuation.passed() <= loan.rules_outcome.valuation.total());
            assert!((0.0..=100.0).contains(&loan.flag_percentage));
            assert!(loan.dscr.map_or(true, |dscr| dscr.is_finite() && dscr >= 0.0));
        }
    }

    #[test]
    fn seed_distinguishes_unknown_and_zero_dscr() {
        let loans = seed_loans();
        assert!(loans.iter().any(|loan| loan.dscr.is_none()));
        assert!(loans.iter().any(|loan| loan.dscr == Some(0.0)));
    }
}
