//! Live equity quote
//!
//! A `Quote` is the normalized view of one row of the exchange's dashboard
//! ticker. It has no identity beyond its ticker and is rebuilt on every
//! live request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of one traded instrument
///
/// Prices and amounts are in MAD. Any field the upstream row lacks (or
/// sends in an unparseable form) is `None` and serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Exchange ticker, e.g. `ATW`
    pub ticker: String,
    /// Display name, e.g. `Attijariwafa Bank`
    pub name: String,
    /// Sub-sector label
    pub sector: String,
    pub last_price: Option<Decimal>,
    /// Static reference price of the session
    pub ref_price: Option<Decimal>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    /// Variation against the previous session, in percent
    pub variation_pct: Option<Decimal>,
    /// Traded value
    pub volume: Option<Decimal>,
    /// Number of shares traded
    pub qty_traded: Option<Decimal>,
    /// Number of trades
    pub nb_trades: Option<Decimal>,
    pub capitalisation: Option<Decimal>,
    /// Upstream trading status code
    pub status: Option<String>,
    pub bid_price: Option<Decimal>,
    pub ask_price: Option<Decimal>,
}

impl Quote {
    /// Case-insensitive exact ticker comparison
    pub fn ticker_matches(&self, key: &str) -> bool {
        self.ticker.to_uppercase() == key.to_uppercase()
    }

    /// Case-insensitive exact display name comparison
    pub fn name_matches(&self, key: &str) -> bool {
        !self.name.is_empty() && self.name.to_uppercase() == key.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ticker_match_is_case_insensitive_and_exact() {
        let quote = Quote {
            ticker: "ATW".to_string(),
            name: "Attijariwafa Bank".to_string(),
            ..Default::default()
        };
        assert!(quote.ticker_matches("atw"));
        assert!(quote.ticker_matches("ATW"));
        assert!(!quote.ticker_matches("AT"));
        assert!(quote.name_matches("ATTIJARIWAFA BANK"));
        assert!(!quote.name_matches("Attijariwafa"));
    }

    #[test]
    fn test_serializes_absent_fields_as_null() {
        let quote = Quote {
            ticker: "IAM".to_string(),
            variation_pct: Some(Decimal::from_str("-0.44").unwrap()),
            ..Default::default()
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["ticker"], "IAM");
        assert_eq!(json["variation_pct"], "-0.44");
        assert!(json["volume"].is_null());
    }
}
