use crate::error::AppError;
use crate::extract::ValidatedQuery;
use crate::models::{ListResponse, TopQuery};
use crate::state::AppState;
use axum::{Json, extract::State};
use market_data::views::{most_active, top_gainers, top_losers};
use types::quote::Quote;

type Ranking = fn(&[Quote], usize) -> Vec<Quote>;

// Rankings never fail on upstream trouble: they degrade to an empty list.
async fn ranked(
    state: &AppState,
    query: &TopQuery,
    rank: Ranking,
) -> Result<Json<ListResponse<Quote>>, AppError> {
    let limit = query.limit()?;
    let quotes = match state.source.live_quotes().await {
        Ok(quotes) => quotes,
        Err(err) => {
            tracing::warn!(error = %err, "Live quotes unavailable, serving empty ranking");
            Vec::new()
        }
    };
    Ok(Json(rank(&quotes, limit).into()))
}

pub async fn gainers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TopQuery>,
) -> Result<Json<ListResponse<Quote>>, AppError> {
    ranked(&state, &query, top_gainers).await
}

pub async fn losers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TopQuery>,
) -> Result<Json<ListResponse<Quote>>, AppError> {
    ranked(&state, &query, top_losers).await
}

pub async fn active(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<TopQuery>,
) -> Result<Json<ListResponse<Quote>>, AppError> {
    ranked(&state, &query, most_active).await
}
