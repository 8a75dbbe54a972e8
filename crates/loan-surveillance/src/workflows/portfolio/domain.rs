use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authority tier under which a loan was approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelegationType {
    Preview,
    #[serde(rename = "PD")]
    Pd,
    Standard,
}

impl DelegationType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Preview, Self::Pd, Self::Standard]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Preview => "Preview",
            Self::Pd => "PD",
            Self::Standard => "Standard",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanStatus {
    Pass,
    Fail,
    Waiver,
}

impl LoanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Waiver => "WAIVER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort rank: Critical=4 down to Low=1.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Completion checkpoint in the loan review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TlrStatus {
    #[serde(rename = "TLR Completed")]
    Completed,
    #[serde(rename = "TLR Not Completed")]
    NotCompleted,
    #[serde(rename = "unknown")]
    Unknown,
}

impl TlrStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "TLR Completed",
            Self::NotCompleted => "TLR Not Completed",
            Self::Unknown => "unknown",
        }
    }

    /// Exact match against the statuses an analysis document may report.
    pub fn from_reported(value: &str) -> Option<Self> {
        match value {
            "TLR Completed" => Some(Self::Completed),
            "TLR Not Completed" => Some(Self::NotCompleted),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Integer risk grade, 1 (best) through 4 (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Clamps into 1..=4; used for seed literals.
    pub const fn saturating(value: u8) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn ordered() -> [Self; 4] {
        [Self(1), Self(2), Self(3), Self(4)]
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = InvalidRiskScore;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidRiskScore(value))
    }
}

impl From<RiskScore> for u8 {
    fn from(value: RiskScore) -> Self {
        value.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("risk score {0} outside 1..=4")]
pub struct InvalidRiskScore(pub u8);

/// Passed/total counts over rule categories; `passed <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ComplianceScore {
    passed: u32,
    total: u32,
}

impl ComplianceScore {
    pub const fn new(passed: u32, total: u32) -> Option<Self> {
        if passed <= total {
            Some(Self { passed, total })
        } else {
            None
        }
    }

    /// Caps `passed` at `total`; used for seed literals.
    pub const fn saturating(passed: u32, total: u32) -> Self {
        let passed = if passed > total { total } else { passed };
        Self { passed, total }
    }

    pub const fn passed(self) -> u32 {
        self.passed
    }

    pub const fn total(self) -> u32 {
        self.total
    }

    pub const fn failed(self) -> u32 {
        self.total - self.passed
    }
}

impl fmt::Display for ComplianceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.passed, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesOutcome {
    pub income_expense: ComplianceScore,
    pub valuation: ComplianceScore,
}

/// Canonical loan record as surfaced to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub loan_number: String,
    pub property_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: Option<String>,
    pub property_type: String,
    pub units: Option<u32>,
    pub product_type: String,
    pub lender: String,
    pub underwriter: String,
    pub originator: String,
    pub acquisition_date: Option<String>,
    pub commitment_date: Option<String>,
    pub last_review_date: Option<String>,
    pub next_review_date: Option<String>,
    pub delegation_type: DelegationType,
    pub status: LoanStatus,
    pub severity: Severity,
    pub tlr_status: Option<TlrStatus>,
    pub loan_amount: f64,
    pub upb: f64,
    pub risk_score: RiskScore,
    pub flag_percentage: f64,
    pub dscr: Option<f64>,
    pub ltv: f64,
    pub occupancy: f64,
    #[serde(rename = "complianceScoreData")]
    pub compliance_score: ComplianceScore,
    pub rules_outcome: RulesOutcome,
    pub rules: Vec<String>,
    pub ai_explanation: String,
    pub critical_risk_summary: String,
    pub key_risk_areas: Vec<String>,
}

impl Loan {
    pub fn acquired_on(&self) -> Option<NaiveDate> {
        parse_loan_date(self.acquisition_date.as_deref())
    }

    pub fn committed_on(&self) -> Option<NaiveDate> {
        parse_loan_date(self.commitment_date.as_deref())
    }

    pub fn last_reviewed_on(&self) -> Option<NaiveDate> {
        parse_loan_date(self.last_review_date.as_deref())
    }

    pub fn next_review_on(&self) -> Option<NaiveDate> {
        parse_loan_date(self.next_review_date.as_deref())
    }

    /// `riskScore >= 3`; one of two distinct "critical" notions.
    pub fn is_high_risk(&self) -> bool {
        self.risk_score.get() >= 3
    }

    /// `severity == Critical`; kept separate from [`Loan::is_high_risk`].
    pub fn is_critical_severity(&self) -> bool {
        self.severity == Severity::Critical
    }
}

pub(crate) fn parse_loan_date(value: Option<&str>) -> Option<NaiveDate> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Display title for a key risk area tag such as `income_expense` or `ltv-stress`.
pub fn risk_area_title(tag: &str) -> String {
    const ACRONYMS: &[&str] = &["DSCR", "LTV", "TLR", "UPB", "NOI"];

    tag.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            if let Some(acronym) = ACRONYMS
                .iter()
                .find(|acronym| acronym.eq_ignore_ascii_case(word))
            {
                return (*acronym).to_string();
            }
            if word.eq_ignore_ascii_case("and") {
                return "&".to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
