use super::mapping::{locate_sections, RuleSection};
use super::normalizer::normalize_status;
use crate::workflows::portfolio::domain::ComplianceScore;
use serde::Serialize;
use serde_json::{Map, Value};

/// Pass/fail result for one rule category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOutcome {
    pub section: RuleSection,
    pub name: String,
    pub total_rules: u32,
    pub failed_rules: u32,
}

impl CategoryOutcome {
    /// A category passes when none of its rules failed.
    pub fn passed(&self) -> bool {
        self.failed_rules == 0
    }
}

/// Compliance counts derived from the rule sections of an analysis document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceBreakdown {
    pub overall: ComplianceScore,
    pub income_expense: Option<ComplianceScore>,
    pub valuation: Option<ComplianceScore>,
    pub categories: Vec<CategoryOutcome>,
}

impl ComplianceBreakdown {
    pub fn section_score(&self, section: RuleSection) -> Option<ComplianceScore> {
        match section {
            RuleSection::IncomeExpense => self.income_expense,
            RuleSection::Valuation => self.valuation,
        }
    }
}

/// Scores every located rule section. `None` means the document carries no
/// rule sections at all, which callers must not confuse with `0/0`.
pub fn score_document(document: &Value) -> Option<ComplianceBreakdown> {
    let located = locate_sections(document);
    if located.is_empty() {
        return None;
    }

    let mut categories = Vec::new();
    let mut present = Vec::with_capacity(located.len());
    for entry in &located {
        present.push(entry.section);
        categories.extend(score_section(entry.section, entry.body));
    }

    let overall = tally(categories.iter());
    let section_tally = |section: RuleSection| {
        present
            .contains(&section)
            .then(|| tally(categories.iter().filter(|c| c.section == section)))
    };
    let income_expense = section_tally(RuleSection::IncomeExpense);
    let valuation = section_tally(RuleSection::Valuation);

    tracing::debug!(
        sections = located.len(),
        passed = overall.passed(),
        total = overall.total(),
        "scored compliance sections"
    );

    Some(ComplianceBreakdown {
        overall,
        income_expense,
        valuation,
        categories,
    })
}

fn tally<'a>(categories: impl Iterator<Item = &'a CategoryOutcome>) -> ComplianceScore {
    let (passed, total) = categories.fold((0u32, 0u32), |(passed, total), category| {
        (passed + u32::from(category.passed()), total + 1)
    });
    ComplianceScore::saturating(passed, total)
}

fn score_section(section: RuleSection, body: &Map<String, Value>) -> Vec<CategoryOutcome> {
    let Some(categories) = body.get("categories").and_then(Value::as_object) else {
        return Vec::new();
    };

    categories
        .iter()
        .filter_map(|(name, category)| {
            let rules = match category {
                Value::Array(rules) => rules.as_slice(),
                Value::Object(fields) => fields
                    .get("rules")
                    .and_then(Value::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]),
                _ => return None,
            };

            let statuses: Vec<String> = rules
                .iter()
                .filter_map(|rule| rule.as_object()?.get("status")?.as_str())
                .map(normalize_status)
                .collect();
            let failed_rules = statuses.iter().filter(|status| *status == "fail").count();

            Some(CategoryOutcome {
                section,
                name: name.clone(),
                total_rules: rules.len() as u32,
                failed_rules: failed_rules as u32,
            })
        })
        .collect()
}
