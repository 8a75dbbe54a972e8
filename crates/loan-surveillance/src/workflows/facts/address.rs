use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

static SEGMENT_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
static ADDRESS_PARTS: OnceLock<Regex> = OnceLock::new();

/// Street address recovered from a free-text statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAddress {
    pub street: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
}

fn segment_patterns() -> &'static [Regex] {
    SEGMENT_PATTERNS.get_or_init(|| {
        [
            r"(?i)located\s+at\s+(.+?)(?:\.(?:\s|$)|[!?;]|$)",
            r"(?i)address:\s*(.+?)(?:\.(?:\s|$)|[!?;]|$)",
            r"(\d+\s+[A-Za-z0-9 .'#-]+?,\s*[A-Za-z .'-]+?,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?)",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid address segment pattern"))
        .collect()
    })
}

fn address_parts() -> &'static Regex {
    ADDRESS_PARTS.get_or_init(|| {
        Regex::new(
            r"^(?P<street>[^,]+?),\s*(?P<city>[^,]+?),\s*(?P<state>[A-Z]{2})\s+(?P<zip>\d{5}(?:-\d{4})?)$",
        )
        .expect("valid address decomposition pattern")
    })
}

/// Finds the first address-like segment in `statement` and splits it into parts.
pub fn parse_address(statement: &str) -> Option<PropertyAddress> {
    let segment = segment_patterns().iter().find_map(|pattern| {
        let captured = pattern.captures(statement)?.get(1)?.as_str();
        let cleaned = captured.trim().trim_end_matches('.').trim();
        (!cleaned.is_empty()).then_some(cleaned)
    })?;

    Some(decompose(segment))
}

fn decompose(segment: &str) -> PropertyAddress {
    match address_parts().captures(segment) {
        Some(parts) => PropertyAddress {
            street: parts["street"].trim().to_string(),
            city: Some(parts["city"].trim().to_string()),
            state: Some(parts["state"].to_string()),
            postal_code: Some(parts["zip"].to_string()),
        },
        None => PropertyAddress {
            street: segment.to_string(),
            city: None,
            state: None,
            postal_code: None,
        },
    }
}
