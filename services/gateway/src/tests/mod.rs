//! Route tests against a fixed in-memory market.


use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use market_data::{AdapterError, MarketSource};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use types::history::{DateRange, HistoricalBar};
use types::index::Index;
use types::quote::Quote;

use crate::router::create_router;
use crate::state::AppState;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn outage() -> AdapterError {
    AdapterError::Status {
        endpoint: "stub",
        status: 502,
    }
}

/// Canned `MarketSource`; `None` fields simulate an upstream outage.
pub struct StubSource {
    pub quotes: Option<Vec<Quote>>,
    pub indices: Option<Vec<Index>>,
    pub history: Option<Vec<(String, Vec<HistoricalBar>)>>,
    /// Error returned by `historical` when `history` is `None`
    pub history_failure: fn() -> AdapterError,
    pub requested_ranges: Mutex<Vec<DateRange>>,
}

impl StubSource {
    pub fn healthy() -> Self {
        Self {
            quotes: Some(sample_quotes()),
            indices: Some(sample_indices()),
            history: Some(vec![
                ("ATW".to_string(), sample_bars()),
                ("BCP".to_string(), Vec::new()),
            ]),
            history_failure: outage,
            requested_ranges: Mutex::new(Vec::new()),
        }
    }

    pub fn down() -> Self {
        Self {
            quotes: None,
            indices: None,
            history: None,
            history_failure: outage,
            requested_ranges: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self {
            quotes: Some(Vec::new()),
            indices: Some(Vec::new()),
            history: Some(Vec::new()),
            history_failure: outage,
            requested_ranges: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MarketSource for StubSource {
    async fn live_quotes(&self) -> Result<Vec<Quote>, AdapterError> {
        self.quotes.clone().ok_or_else(outage)
    }

    async fn indices(&self) -> Result<Vec<Index>, AdapterError> {
        self.indices.clone().ok_or_else(outage)
    }

    async fn historical(
        &self,
        ticker: &str,
        range: &DateRange,
    ) -> Result<Vec<HistoricalBar>, AdapterError> {
        self.requested_ranges.lock().unwrap().push(*range);
        let history = self.history.as_ref().ok_or_else(self.history_failure)?;
        history
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(ticker))
            .map(|(_, bars)| bars.clone())
            .ok_or_else(|| AdapterError::InstrumentNotFound(ticker.to_uppercase()))
    }
}

pub fn sample_quotes() -> Vec<Quote> {
    vec![
        Quote {
            ticker: "ATW".into(),
            name: "ATTIJARIWAFA BANK".into(),
            sector: "Banques".into(),
            last_price: Some(dec("485.00")),
            ref_price: Some(dec("482.50")),
            variation_pct: Some(dec("0.52")),
            volume: Some(dec("125430.00")),
            capitalisation: Some(dec("104000000000")),
            ..Default::default()
        },
        Quote {
            ticker: "IAM".into(),
            name: "ITISSALAT AL-MAGHRIB".into(),
            sector: "Telecommunications".into(),
            last_price: Some(dec("112.00")),
            ref_price: Some(dec("112.50")),
            variation_pct: Some(dec("-0.44")),
            volume: Some(dec("85000.50")),
            capitalisation: Some(dec("98000000000")),
            ..Default::default()
        },
    ]
}

pub fn sample_indices() -> Vec<Index> {
    vec![
        Index {
            category: "Indices principaux".into(),
            name: "MASI".into(),
            code: "MASI".into(),
            value: Some(dec("13250.45")),
            variation_pct: Some(dec("0.31")),
            ..Default::default()
        },
        Index {
            category: "Indices sectoriels".into(),
            name: "Banques".into(),
            code: "BANK".into(),
            value: Some(dec("15010.10")),
            ..Default::default()
        },
    ]
}

pub fn sample_bars() -> Vec<HistoricalBar> {
    vec![
        HistoricalBar {
            date: Some("2024-03-29".into()),
            close: Some(dec("485.00")),
            volume: Some(dec("1200000")),
            ..Default::default()
        },
        HistoricalBar {
            date: Some("2024-03-28".into()),
            close: Some(dec("480.10")),
            volume: Some(dec("980000")),
            ..Default::default()
        },
    ]
}

pub fn app(source: Arc<StubSource>) -> Router {
    create_router(AppState::new(source))
}

/// Issues a GET and returns the status with the decoded JSON body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
