//! Lenient numeric decoding for upstream payloads
//!
//! The exchange site is inconsistent about numeric fields: the same key can
//! arrive as a JSON number, a numeric string, an empty string or `null`.
//! Everything funnels through [`decimal_from_value`] so the public schema
//! only ever exposes `Option<Decimal>`.
//!
//! Uses rust_decimal so aggregate sums (market summary) stay exact.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Decode a JSON value as a decimal.
///
/// Accepts numbers and numeric strings. Returns `None` for `null`, empty
/// strings, booleans, containers and anything that fails to parse.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Parse a decimal from upstream text.
///
/// Tolerates surrounding whitespace, thousands separators written as
/// (non-breaking) spaces or commas, a comma decimal separator and scientific
/// notation. A lone comma followed by exactly three digits (`"1,234"`) could
/// be either separator and is rejected.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}')
        .collect();
    if compact.is_empty() {
        return None;
    }

    let normalized = normalize_separators(compact)?;

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

fn normalize_separators(compact: String) -> Option<String> {
    match (compact.rfind(','), compact.rfind('.')) {
        (None, _) => Some(compact),
        // 1,234.50
        (Some(comma), Some(dot)) if comma < dot => Some(compact.replace(',', "")),
        // 1.234,50
        (Some(_), Some(_)) => Some(compact.replace('.', "").replace(',', ".")),
        (Some(_), None) => normalize_commas(&compact),
    }
}

fn normalize_commas(compact: &str) -> Option<String> {
    let unsigned = compact.trim_start_matches(['-', '+']);
    let groups: Vec<&str> = unsigned.split(',').collect();

    let lead = groups[0];
    let grouped = (1..=3).contains(&lead.len())
        && !lead.starts_with('0')
        && groups[1..]
            .iter()
            .all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit()));

    match (groups.len(), grouped) {
        (2, true) => None,
        (2, false) => Some(compact.replacen(',', ".", 1)),
        (_, true) => Some(compact.replace(',', "")),
        _ => None,
    }
}

/// Decode a JSON value as display text.
///
/// Strings pass through, numbers and booleans are rendered; `null` and
/// containers are absent.
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Round a monetary aggregate to 2 decimal places (banker's rounding).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp(2)
}
