use crate::error::AppError;
use crate::extract::ValidatedQuery;
use crate::models::{HistoricalQuery, HistoricalResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn history(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    ValidatedQuery(query): ValidatedQuery<HistoricalQuery>,
) -> Result<Json<HistoricalResponse>, AppError> {
    let range = query.date_range()?;
    let bars = state
        .source
        .historical(&ticker, &range)
        .await
        .map_err(|err| AppError::from_history(&ticker, err))?;

    if bars.is_empty() {
        return Err(AppError::history_not_found(&ticker));
    }

    tracing::debug!(ticker = %ticker, bars = bars.len(), "History served");
    Ok(Json(HistoricalResponse {
        ticker: ticker.to_uppercase(),
        count: bars.len(),
        data: bars,
    }))
}
