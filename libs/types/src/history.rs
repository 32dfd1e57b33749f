//! Historical session bars and the date ranges used to query them

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::RangeError;

/// Wire format of session dates in query parameters and upstream filters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One trading session of one instrument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    /// Session timestamp as sent upstream
    pub date: Option<String>,
    pub open: Option<Decimal>,
    pub close: Option<Decimal>,
    /// Last traded price of the session
    pub last: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    /// Traded value
    pub volume: Option<Decimal>,
    /// Number of shares traded
    pub qty: Option<Decimal>,
    /// Number of trades
    pub trades: Option<Decimal>,
    pub market_cap: Option<Decimal>,
}

/// Inclusive session date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, RangeError> {
        if from > to {
            return Err(RangeError::Inverted {
                from: from.format(DATE_FORMAT).to_string(),
                to: to.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { from, to })
    }

    /// Parse a range from `YYYY-MM-DD` strings.
    pub fn parse(from: &str, to: &str) -> Result<Self, RangeError> {
        let from = parse_date("from_date", from)?;
        let to = parse_date("to_date", to)?;
        Self::new(from, to)
    }

    /// Lower bound formatted for upstream filters
    pub fn from_param(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    /// Upper bound formatted for upstream filters
    pub fn to_param(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| RangeError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_range() {
        let range = DateRange::parse("2024-01-01", "2024-03-31").unwrap();
        assert_eq!(range.from_param(), "2024-01-01");
        assert_eq!(range.to_param(), "2024-03-31");
    }

    #[test]
    fn test_single_day_range_is_valid() {
        assert!(DateRange::parse("2024-02-29", "2024-02-29").is_ok());
    }

    #[test]
    fn test_malformed_dates_rejected() {
        let err = DateRange::parse("01/02/2024", "2024-03-31").unwrap_err();
        assert_eq!(
            err,
            RangeError::InvalidDate {
                field: "from_date",
                value: "01/02/2024".to_string()
            }
        );

        let err = DateRange::parse("2024-01-01", "2024-02-30").unwrap_err();
        assert!(matches!(err, RangeError::InvalidDate { field: "to_date", .. }));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::parse("2024-05-01", "2024-01-01").unwrap_err();
        assert_eq!(
            err,
            RangeError::Inverted {
                from: "2024-05-01".to_string(),
                to: "2024-01-01".to_string()
            }
        );
    }
}
