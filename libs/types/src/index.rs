//! Live market index snapshot (MASI, MSI20, sector indices)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a market index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Group title the index is listed under
    pub category: String,
    pub name: String,
    /// Short code, derived from the last segment of the upstream index URL
    pub code: String,
    pub value: Option<Decimal>,
    /// Previous session close
    pub previous: Option<Decimal>,
    /// Daily variation, in percent
    pub variation_pct: Option<Decimal>,
    /// Year-to-date variation, in percent
    pub variation_ytd: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub capitalisation: Option<Decimal>,
}

impl Index {
    /// Case-insensitive exact code comparison
    pub fn code_matches(&self, key: &str) -> bool {
        self.code.to_uppercase() == key.to_uppercase()
    }
}

/// Derive an index code from its upstream URL.
///
/// Takes the last `/`-separated segment, ignoring a trailing slash. Absent
/// or blank URLs give an empty code.
pub fn code_from_url(index_url: Option<&str>) -> String {
    index_url
        .map(str::trim)
        .map(|url| url.trim_end_matches('/'))
        .and_then(|url| url.rsplit('/').next())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_from_url() {
        assert_eq!(code_from_url(Some("/fr/live-market/indices/MASI")), "MASI");
        assert_eq!(code_from_url(Some("https://x/indices/MSI20/")), "MSI20");
        assert_eq!(code_from_url(Some("BANK")), "BANK");
        assert_eq!(code_from_url(Some("")), "");
        assert_eq!(code_from_url(None), "");
    }

    #[test]
    fn test_code_match() {
        let index = Index {
            code: "MSI20".to_string(),
            ..Default::default()
        };
        assert!(index.code_matches("msi20"));
        assert!(!index.code_matches("MSI"));
        assert!(!Index::default().code_matches("MASI"));
    }
}
