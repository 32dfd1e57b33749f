//! Upstream adapter configuration
//!
//! Defaults reproduce what the public exchange website expects; tests point
//! `base_url` at a local mock server and zero the page delay.

use std::time::Duration;

/// Public website of the Casablanca stock exchange
pub const DEFAULT_BASE_URL: &str = "https://www.casablanca-bourse.com";

/// Desktop browser user agent; the site rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0.0.0 Safari/537.36";

/// Market segment id of the equities market on the dashboard ticker
pub const EQUITIES_MARKET: &str = "59";

/// Instrument class id of shares on the dashboard ticker
pub const SHARES_CLASS: &str = "50";

/// Page size of the instrument history collection (upstream maximum)
pub const HISTORY_PAGE_SIZE: usize = 250;

/// Configuration for [`crate::adapter::BourseAdapter`].
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Scheme + host of the exchange website, without trailing path
    pub base_url: String,
    /// Site locale segment used in every path (`fr`)
    pub locale: String,
    pub user_agent: String,
    /// Skip TLS certificate verification (the site's chain has a history
    /// of failing validation)
    pub accept_invalid_certs: bool,
    /// Timeout for the landing page and dashboard endpoints
    pub dashboard_timeout: Duration,
    /// Timeout for the listing payload and history pages
    pub data_timeout: Duration,
    /// Timeout for each per-instrument symbol lookup
    pub lookup_timeout: Duration,
    /// How long a discovered build id is reused before a refresh
    pub build_id_ttl: Duration,
    /// Records requested per history page
    pub page_size: usize,
    /// Pause between consecutive history page fetches
    pub page_delay: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: "fr".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: true,
            dashboard_timeout: Duration::from_secs(15),
            data_timeout: Duration::from_secs(20),
            lookup_timeout: Duration::from_secs(10),
            build_id_ttl: Duration::from_secs(3600),
            page_size: HISTORY_PAGE_SIZE,
            page_delay: Duration::from_millis(300),
        }
    }
}

impl UpstreamConfig {
    /// Configuration targeting another host (mock servers, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
