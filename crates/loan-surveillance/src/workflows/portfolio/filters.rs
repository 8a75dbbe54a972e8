use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{DelegationType, Loan, RiskScore, TlrStatus};

/// Raw filter and sort parameters as they arrive from a query string or CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub search: Option<String>,
    pub risk_score: Option<String>,
    pub tlr_status: Option<String>,
    pub delegation_type: Option<String>,
    pub lender: Option<String>,
    pub underwriter: Option<String>,
    pub originator: Option<String>,
    pub acquisition_from: Option<String>,
    pub acquisition_to: Option<String>,
    pub commitment_from: Option<String>,
    pub commitment_to: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// `None` for blank values and the `all` sentinel.
fn active(value: &Option<String>) -> Option<&str> {
    let trimmed = value.as_deref()?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed)
    }
}

/// Calendar month used as an inclusive range bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Option<Self> {
        let (year, month) = value.trim().split_once('-')?;
        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Inclusive month window; an absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthRange {
    pub from: Option<YearMonth>,
    pub to: Option<YearMonth>,
}

impl MonthRange {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// An unparseable date cannot satisfy an active bound.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(month) = date.map(YearMonth::of) else {
            return false;
        };
        self.from.map_or(true, |from| month >= from) && self.to.map_or(true, |to| month <= to)
    }
}

/// Independent predicates over the merged portfolio, combined by AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanFilters {
    pub search: Option<String>,
    pub risk_score: Option<RiskScore>,
    pub tlr_status: Option<TlrStatus>,
    pub delegation_type: Option<DelegationType>,
    pub lender: Option<String>,
    pub underwriter: Option<String>,
    pub originator: Option<String>,
    pub acquisition: MonthRange,
    pub commitment: MonthRange,
}

impl LoanFilters {
    /// Unrecognized values leave the corresponding filter inactive.
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            search: active(&params.search).map(str::to_lowercase),
            risk_score: active(&params.risk_score)
                .and_then(|raw| raw.parse::<u8>().ok())
                .and_then(RiskScore::new),
            tlr_status: active(&params.tlr_status).and_then(parse_tlr_filter),
            delegation_type: active(&params.delegation_type).and_then(DelegationType::from_label),
            lender: active(&params.lender).map(str::to_string),
            underwriter: active(&params.underwriter).map(str::to_string),
            originator: active(&params.originator).map(str::to_string),
            acquisition: MonthRange {
                from: active(&params.acquisition_from).and_then(YearMonth::parse),
                to: active(&params.acquisition_to).and_then(YearMonth::parse),
            },
            commitment: MonthRange {
                from: active(&params.commitment_from).and_then(YearMonth::parse),
                to: active(&params.commitment_to).and_then(YearMonth::parse),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, loan: &Loan) -> bool {
        self.matches_search(loan)
            && self.risk_score.map_or(true, |score| loan.risk_score == score)
            && self.matches_tlr(loan)
            && self
                .delegation_type
                .map_or(true, |kind| loan.delegation_type == kind)
            && same_name(self.lender.as_deref(), &loan.lender)
            && same_name(self.underwriter.as_deref(), &loan.underwriter)
            && same_name(self.originator.as_deref(), &loan.originator)
            && self.acquisition.contains(loan.acquired_on())
            && self.commitment.contains(loan.committed_on())
    }

    fn matches_search(&self, loan: &Loan) -> bool {
        let Some(needle) = self.search.as_deref() else {
            return true;
        };
        [&loan.loan_number, &loan.address, &loan.city, &loan.lender]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    fn matches_tlr(&self, loan: &Loan) -> bool {
        match self.tlr_status {
            None => true,
            Some(TlrStatus::Unknown) => {
                matches!(loan.tlr_status, None | Some(TlrStatus::Unknown))
            }
            Some(status) => loan.tlr_status == Some(status),
        }
    }
}

fn same_name(wanted: Option<&str>, actual: &str) -> bool {
    wanted.map_or(true, |wanted| wanted.eq_ignore_ascii_case(actual.trim()))
}

fn parse_tlr_filter(value: &str) -> Option<TlrStatus> {
    let key: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    match key.as_str() {
        "tlrcompleted" | "completed" => Some(TlrStatus::Completed),
        "tlrnotcompleted" | "notcompleted" => Some(TlrStatus::NotCompleted),
        "unknown" => Some(TlrStatus::Unknown),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    LoanNumber,
    AcquisitionDate,
    CommitmentDate,
    LastReviewDate,
    NextReviewDate,
    RiskScore,
    FlagPercentage,
    Severity,
}

impl SortField {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::LoanNumber,
            Self::AcquisitionDate,
            Self::CommitmentDate,
            Self::LastReviewDate,
            Self::NextReviewDate,
            Self::RiskScore,
            Self::FlagPercentage,
            Self::Severity,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::LoanNumber => "loanNumber",
            Self::AcquisitionDate => "acquisitionDate",
            Self::CommitmentDate => "commitmentDate",
            Self::LastReviewDate => "lastReviewDate",
            Self::NextReviewDate => "nextReviewDate",
            Self::RiskScore => "riskScore",
            Self::FlagPercentage => "flagPercentage",
            Self::Severity => "severity",
        }
    }

    /// Accepts `riskScore`, `risk_score` or `risk-score` in any case.
    pub fn parse(value: &str) -> Option<Self> {
        let wanted = fold_key(value);
        Self::ordered()
            .into_iter()
            .find(|field| fold_key(field.key()) == wanted)
    }

    fn compare(self, left: &Loan, right: &Loan) -> Ordering {
        match self {
            Self::LoanNumber => left.loan_number.cmp(&right.loan_number),
            Self::AcquisitionDate => date_key(left.acquired_on()).cmp(&date_key(right.acquired_on())),
            Self::CommitmentDate => {
                date_key(left.committed_on()).cmp(&date_key(right.committed_on()))
            }
            Self::LastReviewDate => {
                date_key(left.last_reviewed_on()).cmp(&date_key(right.last_reviewed_on()))
            }
            Self::NextReviewDate => {
                date_key(left.next_review_on()).cmp(&date_key(right.next_review_on()))
            }
            Self::RiskScore => left.risk_score.cmp(&right.risk_score),
            Self::FlagPercentage => left.flag_percentage.total_cmp(&right.flag_percentage),
            Self::Severity => left.severity.rank().cmp(&right.severity.rank()),
        }
    }
}

fn fold_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Missing or unparseable dates sort as the earliest possible value.
fn date_key(date: Option<NaiveDate>) -> i64 {
    date.map_or(i64::MIN, |date| i64::from(date.num_days_from_ce()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for LoanSort {
    fn default() -> Self {
        Self {
            field: SortField::RiskScore,
            direction: SortDirection::Desc,
        }
    }
}

impl LoanSort {
    /// Falls back to the default field and direction independently.
    pub fn from_params(params: &FilterParams) -> Self {
        let defaults = Self::default();
        Self {
            field: active(&params.sort)
                .and_then(SortField::parse)
                .unwrap_or(defaults.field),
            direction: active(&params.direction)
                .and_then(SortDirection::parse)
                .unwrap_or(defaults.direction),
        }
    }

    pub fn sort(&self, loans: &mut [Loan]) {
        let field = self.field;
        match self.direction {
            SortDirection::Asc => loans.sort_by(|left, right| field.compare(left, right)),
            SortDirection::Desc => loans.sort_by(|left, right| field.compare(right, left)),
        }
    }
}

/// Filtered and sorted copy of `loans`; equal keys keep their input order.
pub fn apply(loans: &[Loan], filters: &LoanFilters, sort: &LoanSort) -> Vec<Loan> {
    let mut selected: Vec<Loan> = loans
        .iter()
        .filter(|loan| filters.matches(loan))
        .cloned()
        .collect();
    sort.sort(&mut selected);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::portfolio::domain::Severity;
    use crate::workflows::portfolio::seed::seed_loans;

    fn params() -> FilterParams {
        FilterParams::default()
    }

    fn ids(loans: &[Loan]) -> Vec<&str> {
        loans.iter().map(|loan| loan.id.as_str()).collect()
    }

    #[test]
    fn risk_score_and_lender_combine_with_and() {
        let filters = LoanFilters::from_params(&FilterParams {
            risk_score: Some("4".to_string()),
            lender: Some("greystone capital".to_string()),
            ..params()
        });

        let result = apply(&seed_loans(), &filters, &LoanSort::default());
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn all_and_blank_mean_unset() {
        let filters = LoanFilters::from_params(&FilterParams {
            risk_score: Some("all".to_string()),
            lender: Some("  ".to_string()),
            acquisition_from: Some("ALL".to_string()),
            ..params()
        });
        assert!(filters.is_empty());
        assert_eq!(apply(&seed_loans(), &filters, &LoanSort::default()).len(), 8);
    }

    #[test]
    fn invalid_values_are_ignored() {
        let filters = LoanFilters::from_params(&FilterParams {
            risk_score: Some("9".to_string()),
            delegation_type: Some("Other".to_string()),
            commitment_to: Some("2024-13".to_string()),
            ..params()
        });
        assert!(filters.is_empty());
    }

    #[test]
    fn search_spans_number_address_city_and_lender() {
        let loans = seed_loans();
        let search = |text: &str| {
            let filters = LoanFilters::from_params(&FilterParams {
                search: Some(text.to_string()),
                ..params()
            });
            apply(&loans, &filters, &LoanSort::default()).len()
        };

        assert_eq!(search("ln-2024-0117"), 1);
        assert_eq!(search("COMMERCE BLVD"), 1);
        assert_eq!(search("austin"), 1);
        assert_eq!(search("walker"), 2);
        assert_eq!(search("no such loan"), 0);
    }

    #[test]
    fn unknown_tlr_matches_missing_status() {
        let filters = LoanFilters::from_params(&FilterParams {
            tlr_status: Some("unknown".to_string()),
            ..params()
        });
        let mut result = apply(&seed_loans(), &filters, &LoanSort::default());
        result.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(ids(&result), vec!["3", "4"]);

        let completed = LoanFilters::from_params(&FilterParams {
            tlr_status: Some("TLR Completed".to_string()),
            ..params()
        });
        assert!(apply(&seed_loans(), &completed, &LoanSort::default())
            .iter()
            .all(|loan| loan.tlr_status == Some(TlrStatus::Completed)));
    }

    #[test]
    fn month_ranges_are_inclusive_and_independent() {
        let filters = LoanFilters::from_params(&FilterParams {
            acquisition_from: Some("2024-01".to_string()),
            acquisition_to: Some("2024-03".to_string()),
            ..params()
        });
        let mut result = apply(&seed_loans(), &filters, &LoanSort::default());
        result.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(ids(&result), vec!["1", "2", "4"]);
    }

    #[test]
    fn unparseable_date_fails_active_bound() {
        let filters = LoanFilters::from_params(&FilterParams {
            commitment_from: Some("2020-01".to_string()),
            ..params()
        });
        let result = apply(&seed_loans(), &filters, &LoanSort::default());
        assert!(!ids(&result).contains(&"6"));
        assert_eq!(result.len(), 7);
    }

    #[test]
    fn severity_descending_sort_is_stable() {
        let sort = LoanSort {
            field: SortField::Severity,
            direction: SortDirection::Desc,
        };
        let result = apply(&seed_loans(), &LoanFilters::default(), &sort);
        assert_eq!(ids(&result), vec!["1", "5", "3", "7", "4", "6", "2", "8"]);
        assert_eq!(result[0].severity, Severity::Critical);
    }

    #[test]
    fn unparseable_dates_sort_earliest() {
        let sort = LoanSort {
            field: SortField::CommitmentDate,
            direction: SortDirection::Asc,
        };
        let result = apply(&seed_loans(), &LoanFilters::default(), &sort);
        assert_eq!(result[0].id, "6");

        let descending = LoanSort {
            direction: SortDirection::Desc,
            ..sort
        };
        let result = apply(&seed_loans(), &LoanFilters::default(), &descending);
        assert_eq!(ids(&result), vec!["8", "7", "5", "4", "2", "1", "3", "6"]);
    }

    #[test]
    fn default_sort_is_risk_score_descending() {
        let sort = LoanSort::from_params(&FilterParams {
            sort: Some("bogus".to_string()),
            ..params()
        });
        assert_eq!(sort, LoanSort::default());

        let result = apply(&seed_loans(), &LoanFilters::default(), &sort);
        let scores: Vec<u8> = result.iter().map(|loan| loan.risk_score.get()).collect();
        assert_eq!(scores, vec![4, 4, 3, 3, 2, 2, 1, 1]);
        assert_eq!(ids(&result), vec!["1", "5", "3", "7", "2", "6", "4", "8"]);
    }

    #[test]
    fn sort_fields_parse_in_any_spelling() {
        assert_eq!(SortField::parse("flag_percentage"), Some(SortField::FlagPercentage));
        assert_eq!(SortField::parse("Next-Review-Date"), Some(SortField::NextReviewDate));
        assert_eq!(SortDirection::parse("ASC"), Some(SortDirection::Asc));
    }
}
