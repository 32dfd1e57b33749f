//! Gateway configuration
//!
//! Every setting is a command line flag with an environment fallback, so
//! the binary runs unconfigured against the public website.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{ArgAction, Parser};
use market_data::UpstreamConfig;
use market_data::config::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "gateway",
    version,
    about = "Read-only REST API over the Casablanca Bourse website"
)]
pub struct GatewayConfig {
    /// Address the HTTP server binds to
    #[arg(long, env = "GATEWAY_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Exchange website to read from
    #[arg(long, env = "BOURSE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub upstream_base_url: String,

    /// Site locale used in upstream paths
    #[arg(long, env = "BOURSE_LOCALE", default_value = "fr")]
    pub locale: String,

    /// Skip upstream TLS certificate verification
    #[arg(long, env = "BOURSE_ACCEPT_INVALID_CERTS", default_value_t = true, action = ArgAction::Set)]
    pub accept_invalid_certs: bool,

    #[arg(long, env = "BOURSE_DASHBOARD_TIMEOUT_SECS", default_value_t = 15)]
    pub dashboard_timeout_secs: u64,

    #[arg(long, env = "BOURSE_DATA_TIMEOUT_SECS", default_value_t = 20)]
    pub data_timeout_secs: u64,

    #[arg(long, env = "BOURSE_LOOKUP_TIMEOUT_SECS", default_value_t = 10)]
    pub lookup_timeout_secs: u64,

    /// Lifetime of a discovered build id
    #[arg(long, env = "BOURSE_BUILD_ID_TTL_SECS", default_value_t = 3600)]
    pub build_id_ttl_secs: u64,

    /// Pause between history page fetches
    #[arg(long, env = "BOURSE_PAGE_DELAY_MS", default_value_t = 300)]
    pub page_delay_ms: u64,

    /// tracing filter directives
    #[arg(
        long,
        env = "RUST_LOG",
        default_value = "gateway=info,market_data=info,tower_http=info"
    )]
    pub log_filter: String,
}

impl GatewayConfig {
    /// Adapter settings derived from the flags.
    pub fn upstream(&self) -> UpstreamConfig {
        UpstreamConfig {
            base_url: self.upstream_base_url.clone(),
            locale: self.locale.clone(),
            accept_invalid_certs: self.accept_invalid_certs,
            dashboard_timeout: Duration::from_secs(self.dashboard_timeout_secs),
            data_timeout: Duration::from_secs(self.data_timeout_secs),
            lookup_timeout: Duration::from_secs(self.lookup_timeout_secs),
            build_id_ttl: Duration::from_secs(self.build_id_ttl_secs),
            page_delay: Duration::from_millis(self.page_delay_ms),
            ..UpstreamConfig::default()
        }
    }
}
