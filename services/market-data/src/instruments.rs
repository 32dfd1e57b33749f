//! Ticker → upstream instrument id resolution
//!
//! The history collection is filtered by an internal instrument id that the
//! site never exposes next to the ticker. Finding it means walking the
//! equities listing page payload:
//!
//! ```text
//! /_next/data/{buildId}/{locale}/live-market/marche-actions-listing.json
//!   pageProps.node.field_vactory_paragraphs[]
//!     field_vactory_component.widget_id == "bourse_data_listing:marches-actions"
//!     field_vactory_component.widget_data   (JSON encoded as a string)
//!       extra_field.collection.data.data[]
//!         relationships.symbol.links.related.href  ──GET──▶  data.attributes
//!                                                           { symbol, drupal_internal__id }
//! ```
//!
//! Every entry costs one extra request, issued sequentially until a symbol
//! matches. All knowledge of this layout stays in this module.

use serde_json::Value;
use tracing::{debug, info};
use types::ids::{BuildId, InstrumentId};
use types::numeric::text_from_value;

use crate::client::UpstreamClient;
use crate::config::UpstreamConfig;
use crate::error::AdapterError;

/// Widget that carries the equities listing collection
pub const LISTING_WIDGET_ID: &str = "bourse_data_listing:marches-actions";

const LISTING_ENDPOINT: &str = "equities_listing";
const SYMBOL_ENDPOINT: &str = "instrument_symbol";

/// Path of the listing data route for a given build.
pub fn listing_path(build_id: &BuildId, locale: &str) -> String {
    format!(
        "/_next/data/{}/{}/live-market/marche-actions-listing.json",
        build_id, locale
    )
}

/// Extract the instrument entries from the listing payload.
pub fn listing_entries(payload: &Value) -> Result<Vec<Value>, String> {
    let paragraphs = payload
        .pointer("/pageProps/node/field_vactory_paragraphs")
        .and_then(Value::as_array)
        .ok_or_else(|| "missing pageProps.node.field_vactory_paragraphs".to_string())?;

    let component = paragraphs
        .iter()
        .filter_map(|block| block.get("field_vactory_component"))
        .find(|component| component["widget_id"].as_str() == Some(LISTING_WIDGET_ID))
        .ok_or_else(|| format!("no paragraph with widget {}", LISTING_WIDGET_ID))?;

    let widget_data = match &component["widget_data"] {
        Value::String(encoded) => serde_json::from_str::<Value>(encoded)
            .map_err(|e| format!("widget_data is not valid JSON: {}", e))?,
        Value::Object(_) => component["widget_data"].clone(),
        _ => return Err("missing widget_data".to_string()),
    };

    widget_data
        .pointer("/extra_field/collection/data/data")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| "missing extra_field.collection.data.data".to_string())
}

/// Link to the symbol resource of one listing entry.
pub fn symbol_href(entry: &Value) -> Option<&str> {
    entry
        .pointer("/relationships/symbol/links/related/href")
        .and_then(Value::as_str)
}

/// Instrument id from a symbol resource, if its symbol is `ticker`
/// (case-insensitive).
pub fn match_symbol(resource: &Value, ticker: &str) -> Option<InstrumentId> {
    let attributes = resource.pointer("/data/attributes")?;
    let symbol = attributes["symbol"].as_str()?;
    if symbol.to_uppercase() != ticker.to_uppercase() {
        return None;
    }
    text_from_value(&attributes["drupal_internal__id"]).map(InstrumentId::new)
}

/// Resolve the instrument id of `ticker` against the listing of `build_id`.
///
/// A symbol lookup answering with an error status or garbage is skipped;
/// a transport failure aborts the scan, since the remaining lookups would
/// most likely time out the same way.
pub async fn resolve(
    client: &UpstreamClient,
    config: &UpstreamConfig,
    build_id: &BuildId,
    ticker: &str,
) -> Result<InstrumentId, AdapterError> {
    let url = client.url(&listing_path(build_id, &config.locale), &[])?;
    let payload = client
        .get_json(LISTING_ENDPOINT, url, config.data_timeout)
        .await?;
    let entries = listing_entries(&payload)
        .map_err(|reason| AdapterError::schema(LISTING_ENDPOINT, reason))?;

    debug!(ticker, entries = entries.len(), "Scanning equities listing");

    for (position, entry) in entries.iter().enumerate() {
        let Some(href) = symbol_href(entry) else {
            debug!(position, "Listing entry without symbol link, skipping");
            continue;
        };
        let url = client.link(href)?;

        match client.get_json(SYMBOL_ENDPOINT, url, config.lookup_timeout).await {
            Ok(resource) => {
                if let Some(id) = match_symbol(&resource, ticker) {
                    info!(ticker, instrument_id = %id, lookups = position + 1, "Instrument resolved");
                    return Ok(id);
                }
            }
            Err(err) if err.is_transport() => return Err(err),
            Err(err) => {
                debug!(position, error = %err, "Symbol lookup failed, skipping entry");
            }
        }
    }

    Err(AdapterError::InstrumentNotFound(ticker.to_uppercase()))
}
