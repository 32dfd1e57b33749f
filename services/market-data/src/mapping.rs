//! Field mapping from upstream payloads to the public schema
//!
//! Each upstream endpoint has its own naming scheme (Drupal field names on
//! the dashboard, camelCase attributes on the history collection). The
//! dictionaries below are the only place those names appear.

use serde_json::Value;
use types::history::HistoricalBar;
use types::index::{code_from_url, Index};
use types::numeric::{decimal_from_value, text_from_value};
use types::quote::Quote;

fn text(row: &Value, key: &str) -> String {
    text_from_value(&row[key]).unwrap_or_default()
}

/// Map one dashboard ticker row onto a [`Quote`].
pub fn quote_from_row(row: &Value) -> Quote {
    Quote {
        ticker: text(row, "ticker"),
        name: text(row, "label"),
        sector: text(row, "sous_secteur"),
        last_price: decimal_from_value(&row["field_cours_courant"]),
        ref_price: decimal_from_value(&row["field_static_reference_price"]),
        open: decimal_from_value(&row["field_opening_price"]),
        high: decimal_from_value(&row["field_high_price"]),
        low: decimal_from_value(&row["field_low_price"]),
        variation_pct: decimal_from_value(&row["field_var_veille"]),
        volume: decimal_from_value(&row["field_cumul_volume_echange"]),
        qty_traded: decimal_from_value(&row["field_cumul_titres_echanges"]),
        nb_trades: decimal_from_value(&row["field_total_trades"]),
        capitalisation: decimal_from_value(&row["field_capitalisation"]),
        status: text_from_value(&row["field_etat_cot_val"]),
        bid_price: decimal_from_value(&row["field_best_bid_price"]),
        ask_price: decimal_from_value(&row["field_best_ask_price"]),
    }
}

/// Map the dashboard ticker payload (`data.values`) onto quotes, keeping
/// upstream order.
pub fn quotes_from_payload(payload: &Value) -> Result<Vec<Quote>, String> {
    let rows = payload
        .pointer("/data/values")
        .and_then(Value::as_array)
        .ok_or_else(|| "missing data.values array".to_string())?;
    Ok(rows.iter().map(quote_from_row).collect())
}

/// Map one index-watch item onto an [`Index`] listed under `category`.
pub fn index_from_item(category: &str, item: &Value) -> Index {
    Index {
        category: category.to_string(),
        name: text(item, "index"),
        code: code_from_url(item["index_url"].as_str()),
        value: decimal_from_value(&item["field_index_value"]),
        previous: decimal_from_value(&item["veille"]),
        variation_pct: decimal_from_value(&item["field_var_veille"]),
        variation_ytd: decimal_from_value(&item["field_var_year"]),
        high: decimal_from_value(&item["field_index_high_value"]),
        low: decimal_from_value(&item["field_index_low_value"]),
        capitalisation: decimal_from_value(&item["field_market_capitalisation"]),
    }
}

/// Flatten the grouped index-watch payload (`data[].items[]`) into one
/// ordered list. Groups without items contribute nothing.
pub fn indices_from_payload(payload: &Value) -> Result<Vec<Index>, String> {
    let groups = payload
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| "missing data array".to_string())?;

    let mut indices = Vec::new();
    for group in groups {
        let category = text(group, "title");
        if let Some(items) = group.get("items").and_then(Value::as_array) {
            indices.extend(items.iter().map(|item| index_from_item(&category, item)));
        }
    }
    Ok(indices)
}

/// Map the `attributes` object of one history record onto a bar.
pub fn bar_from_attributes(attributes: &Value) -> HistoricalBar {
    HistoricalBar {
        date: text_from_value(&attributes["created"]),
        open: decimal_from_value(&attributes["openingPrice"]),
        close: decimal_from_value(&attributes["closingPrice"]),
        last: decimal_from_value(&attributes["coursCourant"]),
        high: decimal_from_value(&attributes["highPrice"]),
        low: decimal_from_value(&attributes["lowPrice"]),
        volume: decimal_from_value(&attributes["cumulVolumeEchange"]),
        qty: decimal_from_value(&attributes["cumulTitresEchanges"]),
        trades: decimal_from_value(&attributes["totalTrades"]),
        market_cap: decimal_from_value(&attributes["capitalisation"]),
    }
}

/// Map one history page. An absent or `null` `data` member is an empty
/// page; a record without `attributes` makes the whole page invalid.
pub fn bars_from_page(payload: &Value) -> Result<Vec<HistoricalBar>, String> {
    let records = match payload.get("data") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(records)) => records,
        Some(_) => return Err("data is not an array".to_string()),
    };

    records
        .iter()
        .enumerate()
        .map(|(position, record)| match record.get("attributes") {
            Some(attributes) if attributes.is_object() => Ok(bar_from_attributes(attributes)),
            _ => Err(format!("record {} has no attributes", position)),
        })
        .collect()
}
