//! Market Data Adapter
//!
//! Reads the Casablanca Bourse website's internal JSON endpoints and
//! produces:
//! - Live equity quotes (dashboard ticker)
//! - Index snapshots (grouped index watch)
//! - Historical session bars (paginated JSON:API collection)
//! - Derived views: top gainers/losers, most active, market summary
//!
//! # Architecture
//!
//! ```text
//!            Gateway handlers
//!                   │
//!            ┌──────▼──────┐
//!            │MarketSource │  ← trait seam (views computed on top)
//!            └──────┬──────┘
//!                   │
//!           ┌───────▼───────┐
//!           │ BourseAdapter │
//!           └─┬─────┬─────┬─┘
//!             │     │     │
//!   ┌─────────▼┐ ┌──▼───────────┐ ┌▼────────┐
//!   │ Build id │ │ Instruments  │ │ History │
//!   │  cache   │ │  resolver    │ │  pager  │
//!   └─────────┬┘ └──┬───────────┘ └┬────────┘
//!             │     │              │
//!          ┌──▼─────▼──────────────▼──┐
//!          │  UpstreamClient (reqwest) │
//!          └───────────────────────────┘
//! ```

pub mod adapter;
pub mod build_id;
pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod instruments;
pub mod mapping;
pub mod source;
pub mod views;

pub use adapter::BourseAdapter;
pub use config::UpstreamConfig;
pub use error::AdapterError;
pub use source::MarketSource;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
