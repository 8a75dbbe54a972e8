use crate::workflows::portfolio::domain::{RiskScore, TlrStatus};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use super::DscrFact;

static LTV_STATEMENT: OnceLock<Regex> = OnceLock::new();

pub(crate) fn section<'a>(document: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    document.as_object()?.get(key)?.as_object()
}

/// Free-text `facts_lookup.<id>.statement` entries in key order.
pub(crate) fn statements(document: &Value) -> Vec<&str> {
    let Some(lookup) = section(document, "facts_lookup") else {
        return Vec::new();
    };

    lookup
        .values()
        .filter_map(|fact| fact.as_object()?.get("statement")?.as_str())
        .filter(|statement| !statement.trim().is_empty())
        .collect()
}

/// Accepts a JSON number or a string such as `"1,250,000"`, `"62.5%"` or `"$4,100"`.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(raw) => parse_number_text(raw)?,
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}

fn parse_number_text(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let trimmed = trimmed.trim_end();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

pub(crate) fn parse_non_negative(value: &Value) -> Option<f64> {
    parse_number(value).filter(|number| *number >= 0.0)
}

pub(crate) fn parse_risk_score(value: &Value) -> Option<RiskScore> {
    let number = parse_number(value)?;
    if number.fract() != 0.0 || number < f64::from(RiskScore::MIN) || number > f64::from(RiskScore::MAX)
    {
        return None;
    }
    RiskScore::new(number as u8)
}

pub(crate) fn parse_units(value: &Value) -> Option<u32> {
    let number = parse_non_negative(value)?;
    if number.fract() != 0.0 || number > f64::from(u32::MAX) {
        return None;
    }
    Some(number as u32)
}

/// `None` when the key is missing or unreadable; `Unknown` when it is
/// explicitly null or blank.
pub(crate) fn parse_dscr(summary: &Map<String, Value>) -> Option<DscrFact> {
    match summary.get("DSCR")? {
        Value::Null => Some(DscrFact::Unknown),
        Value::String(raw) if raw.trim().is_empty() => Some(DscrFact::Unknown),
        other => parse_non_negative(other).map(DscrFact::Value),
    }
}

pub(crate) fn parse_tlr_status(value: &Value) -> Option<TlrStatus> {
    TlrStatus::from_reported(value.as_str()?)
}

pub(crate) fn parse_text(value: &Value) -> Option<String> {
    let text = value.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Any string is kept verbatim, including an empty one.
pub(crate) fn parse_verbatim(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

pub(crate) fn parse_text_list(value: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .as_array()?
        .iter()
        .filter_map(parse_text)
        .collect();
    (!items.is_empty()).then_some(items)
}

pub(crate) fn ltv_from_statement(statement: &str) -> Option<f64> {
    let pattern = LTV_STATEMENT.get_or_init(|| {
        Regex::new(r"(?i)\bLTV\s+is\s+(\d+(?:\.\d+)?)\s*%").expect("valid LTV pattern")
    });
    let captures = pattern.captures(statement)?;
    let value = captures.get(1)?.as_str().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}
