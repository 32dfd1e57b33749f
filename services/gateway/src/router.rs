use crate::handlers::{historical, indices, info, market, top};
use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/market", get(market::list_quotes))
        .route("/market/summary", get(market::summary))
        .route("/stocks/{ticker}", get(market::quote_by_ticker))
        .route("/indices", get(indices::list_indices))
        .route("/indices/{code}", get(indices::index_by_code))
        .route("/top/gainers", get(top::gainers))
        .route("/top/losers", get(top::losers))
        .route("/top/active", get(top::active))
        .route("/historical/{ticker}", get(historical::history));

    Router::new()
        .route("/", get(info::root))
        .route("/health", get(info::health))
        .nest("/api/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
