//! Error taxonomy of the upstream adapter
//!
//! "No data" is never an error: empty listings come back as `Ok(vec![])`
//! and missed lookups as `Ok(None)`. Every variant here means the upstream
//! site could not be read or did not look the way we expect.

use thiserror::Error;

/// Errors raised while talking to the exchange website.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("upstream request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream {endpoint} answered with status {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("unexpected payload from {endpoint}: {reason}")]
    Schema { endpoint: &'static str, reason: String },

    #[error("build identifier unavailable")]
    BuildIdUnavailable,

    #[error("instrument not found: {0}")]
    InstrumentNotFound(String),

    #[error("adapter misconfigured: {0}")]
    Config(String),
}

impl AdapterError {
    pub(crate) fn schema(endpoint: &'static str, reason: impl Into<String>) -> Self {
        AdapterError::Schema {
            endpoint,
            reason: reason.into(),
        }
    }

    /// Whether the failure comes from the network layer rather than from
    /// what upstream sent back.
    pub fn is_transport(&self) -> bool {
        matches!(self, AdapterError::Transport { .. })
    }
}
