use crate::models::{HealthResponse, ServiceInfo};
use axum::Json;

pub const ENDPOINTS: &[&str] = &[
    "/health",
    "/api/v1/market",
    "/api/v1/market/summary",
    "/api/v1/stocks/{ticker}",
    "/api/v1/indices",
    "/api/v1/indices/{code}",
    "/api/v1/top/gainers",
    "/api/v1/top/losers",
    "/api/v1/top/active",
    "/api/v1/historical/{ticker}",
];

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Bourse de Casablanca API",
        version: env!("CARGO_PKG_VERSION"),
        status: "online",
        endpoints: ENDPOINTS,
    })
}

/// Liveness only; never touches the upstream.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
