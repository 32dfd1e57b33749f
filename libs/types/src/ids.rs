//! Opaque identifier types handed out by the exchange website
//!
//! Neither identifier has any structure we rely on; both are carried as
//! strings and only ever compared or spliced into upstream URLs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Next.js build identifier of the exchange website
///
/// Required to address the site's `/_next/data/{build_id}/...` routes.
/// Changes whenever the site is redeployed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(String);

impl BuildId {
    /// Wrap a raw build identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upstream-internal instrument identifier
///
/// Numeric on the wire (`drupal_internal__id`) but treated as opaque text;
/// it is only used as a filter value in history queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
