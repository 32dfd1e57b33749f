//! Seam between the HTTP facade and whatever produces market data
//!
//! The gateway only ever talks to a `MarketSource`. Production uses
//! [`crate::adapter::BourseAdapter`]; route tests plug in fixed data.

use async_trait::async_trait;
use types::history::{DateRange, HistoricalBar};
use types::index::Index;
use types::quote::Quote;

use crate::error::AdapterError;
use crate::views::{find_index, find_quote};

#[async_trait]
pub trait MarketSource: Send + Sync {
    /// All listed equities, in upstream order.
    async fn live_quotes(&self) -> Result<Vec<Quote>, AdapterError>;

    /// All indices, flattened across categories.
    async fn indices(&self) -> Result<Vec<Index>, AdapterError>;

    /// Session bars of `ticker` over `range`, newest first.
    ///
    /// Fails with [`AdapterError::InstrumentNotFound`] when the ticker
    /// cannot be mapped to an instrument.
    async fn historical(
        &self,
        ticker: &str,
        range: &DateRange,
    ) -> Result<Vec<HistoricalBar>, AdapterError>;

    /// One live quote by ticker or display name.
    async fn quote_by_ticker(&self, ticker: &str) -> Result<Option<Quote>, AdapterError> {
        let quotes = self.live_quotes().await?;
        Ok(find_quote(&quotes, ticker).cloned())
    }

    /// One index by code.
    async fn index_by_code(&self, code: &str) -> Result<Option<Index>, AdapterError> {
        let indices = self.indices().await?;
        Ok(find_index(&indices, code).cloned())
    }
}
