//! Build identifier discovery and caching
//!
//! The exchange website is a Next.js application: its per-page data routes
//! live under `/_next/data/{buildId}/...`, and the build id is only
//! published inside the `__NEXT_DATA__` script of a rendered page.
//!
//! The id is cached with the instant it was fetched. Within the TTL it is
//! served without touching the network; once expired, the next caller
//! refreshes it. A failed refresh keeps the stale value in service.

use std::sync::LazyLock;
use std::time::Duration;

use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value;
use tokio::time::Instant;
use types::ids::BuildId;

static NEXT_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script id="__NEXT_DATA__" type="application/json">(.*?)</script>"#)
        .expect("__NEXT_DATA__ pattern is valid")
});

/// Extract the build id from a rendered page.
///
/// Returns a human-readable reason when the script tag, its JSON or the
/// `buildId` field is missing.
pub fn extract_build_id(html: &str) -> Result<BuildId, String> {
    let captures = NEXT_DATA
        .captures(html)
        .ok_or_else(|| "no __NEXT_DATA__ script in page".to_string())?;

    let blob: Value = serde_json::from_str(&captures[1])
        .map_err(|e| format!("__NEXT_DATA__ is not valid JSON: {}", e))?;

    match blob.get("buildId").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(BuildId::new(id)),
        _ => Err("__NEXT_DATA__ has no buildId".to_string()),
    }
}

/// A build id together with the instant it was fetched.
#[derive(Debug, Clone)]
struct CachedBuildId {
    id: BuildId,
    fetched_at: Instant,
}

/// Process-wide build id cache.
///
/// Holds an immutable snapshot that is replaced whole on refresh, so
/// concurrent readers never observe a torn value. Two requests racing on an
/// expired entry may both refresh; the last writer wins.
#[derive(Debug)]
pub struct BuildIdCache {
    ttl: Duration,
    slot: RwLock<Option<CachedBuildId>>,
}

impl BuildIdCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Cached id, if one exists and is younger than the TTL.
    pub fn fresh(&self) -> Option<BuildId> {
        self.slot
            .read()
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.id.clone())
    }

    /// Cached id regardless of age.
    pub fn stale(&self) -> Option<BuildId> {
        self.slot.read().as_ref().map(|cached| cached.id.clone())
    }

    /// Replace the cached id, stamping it with the current instant.
    pub fn store(&self, id: BuildId) {
        *self.slot.write() = Some(CachedBuildId {
            id,
            fetched_at: Instant::now(),
        });
    }

    /// Age of the cached id.
    pub fn age(&self) -> Option<Duration> {
        self.slot.read().as_ref().map(|cached| cached.fetched_at.elapsed())
    }

    /// Validity window of a cached id.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
