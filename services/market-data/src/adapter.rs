//! Upstream adapter for the Casablanca Bourse website
//!
//! Issues the requests, owns the build id cache and turns payloads into
//! domain types. Failures are logged here and returned as
//! [`AdapterError`]; nothing is swallowed.

use async_trait::async_trait;
use tracing::{debug, info, warn};
use types::history::{DateRange, HistoricalBar};
use types::ids::{BuildId, InstrumentId};
use types::index::Index;
use types::quote::Quote;

use crate::build_id::{extract_build_id, BuildIdCache};
use crate::client::UpstreamClient;
use crate::config::{UpstreamConfig, EQUITIES_MARKET, SHARES_CLASS};
use crate::error::AdapterError;
use crate::history::fetch_history;
use crate::instruments;
use crate::mapping::{indices_from_payload, quotes_from_payload};
use crate::source::MarketSource;

const LANDING_ENDPOINT: &str = "landing_page";
const TICKER_ENDPOINT: &str = "dashboard_ticker";
const INDICES_ENDPOINT: &str = "grouped_index_watch";

/// Adapter over the exchange website's internal JSON endpoints.
pub struct BourseAdapter {
    client: UpstreamClient,
    config: UpstreamConfig,
    build_ids: BuildIdCache,
}

impl BourseAdapter {
    pub fn new(config: UpstreamConfig) -> Result<Self, AdapterError> {
        let client = UpstreamClient::new(&config)?;
        let build_ids = BuildIdCache::new(config.build_id_ttl);

        info!(
            base_url = %config.base_url,
            locale = %config.locale,
            accept_invalid_certs = config.accept_invalid_certs,
            build_id_ttl_secs = config.build_id_ttl.as_secs(),
            "BourseAdapter initialized"
        );

        Ok(Self {
            client,
            config,
            build_ids,
        })
    }

    /// Fetch the dashboard ticker for the equities market.
    pub async fn fetch_live_quotes(&self) -> Result<Vec<Quote>, AdapterError> {
        let path = format!("/api/proxy/{}/api/bourse/dashboard/ticker", self.config.locale);
        let url = self
            .client
            .url(&path, &[("marche", EQUITIES_MARKET), ("class[]", SHARES_CLASS)])?;

        let payload = self
            .client
            .get_json(TICKER_ENDPOINT, url, self.config.dashboard_timeout)
            .await?;
        let quotes = quotes_from_payload(&payload)
            .map_err(|reason| AdapterError::schema(TICKER_ENDPOINT, reason))?;

        debug!(count = quotes.len(), "Live quotes fetched");
        Ok(quotes)
    }

    /// Fetch the grouped index watch.
    pub async fn fetch_indices(&self) -> Result<Vec<Index>, AdapterError> {
        let path = format!(
            "/api/proxy/{}/api/bourse/dashboard/grouped_index_watch",
            self.config.locale
        );
        let url = self.client.url(&path, &[])?;

        let payload = self
            .client
            .get_json(INDICES_ENDPOINT, url, self.config.dashboard_timeout)
            .await?;
        let indices = indices_from_payload(&payload)
            .map_err(|reason| AdapterError::schema(INDICES_ENDPOINT, reason))?;

        debug!(count = indices.len(), "Indices fetched");
        Ok(indices)
    }

    /// Current build id of the website.
    ///
    /// Served from cache within the TTL. After expiry a refresh is
    /// attempted; if it fails, the expired id is served instead.
    pub async fn build_id(&self) -> Result<BuildId, AdapterError> {
        if let Some(id) = self.build_ids.fresh() {
            return Ok(id);
        }

        match self.fetch_build_id().await {
            Ok(id) => {
                info!(
                    build_id = %id,
                    valid_for_secs = self.build_ids.ttl().as_secs(),
                    "Build id refreshed"
                );
                self.build_ids.store(id.clone());
                Ok(id)
            }
            Err(err) => match self.build_ids.stale() {
                Some(id) => {
                    warn!(error = %err, build_id = %id, "Build id refresh failed, serving stale value");
                    Ok(id)
                }
                None => {
                    warn!(error = %err, "Build id unavailable");
                    Err(AdapterError::BuildIdUnavailable)
                }
            },
        }
    }

    async fn fetch_build_id(&self) -> Result<BuildId, AdapterError> {
        let url = self.client.url(&self.config.locale, &[])?;
        let html = self
            .client
            .get_text(LANDING_ENDPOINT, url, self.config.dashboard_timeout)
            .await?;
        extract_build_id(&html).map_err(|reason| AdapterError::schema(LANDING_ENDPOINT, reason))
    }

    /// Map a public ticker onto the site's internal instrument id.
    pub async fn instrument_id(&self, ticker: &str) -> Result<InstrumentId, AdapterError> {
        let build_id = self.build_id().await?;
        instruments::resolve(&self.client, &self.config, &build_id, ticker).await
    }

    /// Full session history of `ticker` over `range`, newest first.
    pub async fn fetch_historical(
        &self,
        ticker: &str,
        range: &DateRange,
    ) -> Result<Vec<HistoricalBar>, AdapterError> {
        let instrument = self.instrument_id(ticker).await?;
        let bars = fetch_history(&self.client, &self.config, &instrument, range).await?;

        info!(
            ticker,
            instrument_id = %instrument,
            from = %range.from,
            to = %range.to,
            bars = bars.len(),
            "Historical series fetched"
        );
        Ok(bars)
    }
}

#[async_trait]
impl MarketSource for BourseAdapter {
    async fn live_quotes(&self) -> Result<Vec<Quote>, AdapterError> {
        self.fetch_live_quotes().await
    }

    async fn indices(&self) -> Result<Vec<Index>, AdapterError> {
        self.fetch_indices().await
    }

    async fn historical(
        &self,
        ticker: &str,
        range: &DateRange,
    ) -> Result<Vec<HistoricalBar>, AdapterError> {
        self.fetch_historical(ticker, range).await
    }
}
