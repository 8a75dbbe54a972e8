/// Folds a section key so that `"Income & Expense Rules"`, `"income_expense_rules"`
/// and `" INCOME-EXPENSE rules "` compare by content only.
pub(crate) fn normalize_section_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "").replace('&', "and");
    cleaned
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lower-cased, trimmed rule status as reported in the document.
pub(crate) fn normalize_status(value: &str) -> String {
    value.trim().to_lowercase()
}
