use super::normalizer::normalize_section_key;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

static SECTION_NAME_MAP: OnceLock<HashMap<String, RuleSection>> = OnceLock::new();

/// Rule-category sections the analysis pipeline emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSection {
    IncomeExpense,
    Valuation,
}

impl RuleSection {
    pub const fn ordered() -> [Self; 2] {
        [Self::IncomeExpense, Self::Valuation]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::IncomeExpense => "Income & Expense Rules",
            Self::Valuation => "Valuation Rules",
        }
    }
}

/// A top-level document entry recognized as a rule section.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocatedSection<'a> {
    pub(crate) section: RuleSection,
    pub(crate) key: &'a str,
    pub(crate) body: &'a serde_json::Map<String, Value>,
}

pub(crate) fn section_for_key(key: &str) -> Option<RuleSection> {
    section_name_map()
        .get(&normalize_section_key(key))
        .copied()
}

/// Every top-level object entry whose key names a known rule section, in key order.
pub(crate) fn locate_sections(document: &Value) -> Vec<LocatedSection<'_>> {
    let Some(root) = document.as_object() else {
        return Vec::new();
    };

    root.iter()
        .filter_map(|(key, value)| {
            let section = section_for_key(key)?;
            let body = value.as_object()?;
            Some(LocatedSection {
                section,
                key: key.as_str(),
                body,
            })
        })
        .collect()
}

fn section_name_map() -> &'static HashMap<String, RuleSection> {
    SECTION_NAME_MAP.get_or_init(|| {
        const NAME_TO_SECTION: &[(&str, RuleSection)] = &[
            // Income & expense
            ("Income & Expense Rules", RuleSection::IncomeExpense),
            ("Income and Expense Rules", RuleSection::IncomeExpense),
            ("Income Expense Rules", RuleSection::IncomeExpense),
            ("Income & Expense", RuleSection::IncomeExpense),
            ("income_expense", RuleSection::IncomeExpense),
            ("IncomeExpense", RuleSection::IncomeExpense),
            ("Income/Expense Rules", RuleSection::IncomeExpense),
            // Valuation
            ("Valuation Rules", RuleSection::Valuation),
            ("Valuation", RuleSection::Valuation),
            ("valuation_rules", RuleSection::Valuation),
            ("Appraisal & Valuation Rules", RuleSection::Valuation),
        ];

        let mut map = HashMap::with_capacity(NAME_TO_SECTION.len());
        for (name, section) in NAME_TO_SECTION {
            map.insert(normalize_section_key(name), *section);
        }
        map
    })
}
