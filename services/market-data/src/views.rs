//! Derived views over a live quote snapshot
//!
//! Pure functions: they never fetch, so the gateway can compute several
//! views from one upstream call and tests can feed them fixed data.
//!
//! Sorting uses the stable `sort_by`; quotes with equal keys keep their
//! upstream order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::index::Index;
use types::numeric::round_money;
use types::quote::Quote;

/// Market-wide breadth and totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub total_instruments: usize,
    /// Instruments with a strictly positive variation
    pub gainers: usize,
    /// Instruments with a strictly negative variation
    pub losers: usize,
    /// Instruments with a variation of exactly zero
    pub stable: usize,
    /// Sum of traded values, rounded to 2 decimals
    #[serde(with = "rust_decimal::serde::float")]
    pub total_volume_mad: Decimal,
    /// Sum of capitalisations, rounded to 2 decimals
    #[serde(with = "rust_decimal::serde::float")]
    pub total_capitalisation_mad: Decimal,
}

/// Largest positive variations first.
pub fn top_gainers(quotes: &[Quote], limit: usize) -> Vec<Quote> {
    let mut gainers: Vec<(Decimal, &Quote)> = quotes
        .iter()
        .filter_map(|q| q.variation_pct.filter(|v| *v > Decimal::ZERO).map(|v| (v, q)))
        .collect();
    gainers.sort_by(|a, b| b.0.cmp(&a.0));
    gainers.into_iter().take(limit).map(|(_, q)| q.clone()).collect()
}

/// Most negative variations first.
pub fn top_losers(quotes: &[Quote], limit: usize) -> Vec<Quote> {
    let mut losers: Vec<(Decimal, &Quote)> = quotes
        .iter()
        .filter_map(|q| q.variation_pct.filter(|v| *v < Decimal::ZERO).map(|v| (v, q)))
        .collect();
    losers.sort_by(|a, b| a.0.cmp(&b.0));
    losers.into_iter().take(limit).map(|(_, q)| q.clone()).collect()
}

/// Highest traded value first; quotes without a volume are left out.
pub fn most_active(quotes: &[Quote], limit: usize) -> Vec<Quote> {
    let mut active: Vec<(Decimal, &Quote)> = quotes
        .iter()
        .filter_map(|q| q.volume.map(|v| (v, q)))
        .collect();
    active.sort_by(|a, b| b.0.cmp(&a.0));
    active.into_iter().take(limit).map(|(_, q)| q.clone()).collect()
}

/// Single pass breadth count and totals. Absent variations are counted in
/// `total_instruments` only; absent volumes and capitalisations add zero.
pub fn market_summary(quotes: &[Quote]) -> MarketSummary {
    let mut summary = MarketSummary {
        total_instruments: quotes.len(),
        gainers: 0,
        losers: 0,
        stable: 0,
        total_volume_mad: Decimal::ZERO,
        total_capitalisation_mad: Decimal::ZERO,
    };

    for quote in quotes {
        match quote.variation_pct {
            Some(v) if v > Decimal::ZERO => summary.gainers += 1,
            Some(v) if v < Decimal::ZERO => summary.losers += 1,
            Some(_) => summary.stable += 1,
            None => {}
        }
        summary.total_volume_mad += quote.volume.unwrap_or_default();
        summary.total_capitalisation_mad += quote.capitalisation.unwrap_or_default();
    }

    summary.total_volume_mad = round_money(summary.total_volume_mad);
    summary.total_capitalisation_mad = round_money(summary.total_capitalisation_mad);
    summary
}

/// Case-insensitive exact lookup by ticker, falling back to display name.
/// A ticker match anywhere in the list wins over a name match.
pub fn find_quote<'a>(quotes: &'a [Quote], key: &str) -> Option<&'a Quote> {
    quotes
        .iter()
        .find(|q| q.ticker_matches(key))
        .or_else(|| quotes.iter().find(|q| q.name_matches(key)))
}

/// Case-insensitive exact lookup by index code.
pub fn find_index<'a>(indices: &'a [Index], code: &str) -> Option<&'a Index> {
    indices.iter().find(|i| i.code_matches(code))
}
