use crate::error::AppError;
use crate::models::ListResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use market_data::views::{MarketSummary, market_summary};
use types::quote::Quote;

/// Live quotes, after the empty-market check.
async fn live_quotes(state: &AppState) -> Result<Vec<Quote>, AppError> {
    let quotes = state.source.live_quotes().await?;
    if quotes.is_empty() {
        tracing::warn!("Upstream returned no quotes");
        return Err(AppError::unavailable());
    }
    Ok(quotes)
}

pub async fn list_quotes(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Quote>>, AppError> {
    let quotes = live_quotes(&state).await?;
    Ok(Json(quotes.into()))
}

pub async fn summary(State(state): State<AppState>) -> Result<Json<MarketSummary>, AppError> {
    let quotes = live_quotes(&state).await?;
    Ok(Json(market_summary(&quotes)))
}

pub async fn quote_by_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<Quote>, AppError> {
    state
        .source
        .quote_by_ticker(&ticker)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Ticker '{}' non trouve", ticker)))
}
