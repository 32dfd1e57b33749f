use crate::error::AppError;
use crate::models::ListResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use types::index::Index;

pub async fn list_indices(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Index>>, AppError> {
    let indices = state.source.indices().await?;
    if indices.is_empty() {
        tracing::warn!("Upstream returned no indices");
        return Err(AppError::unavailable());
    }
    Ok(Json(indices.into()))
}

pub async fn index_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Index>, AppError> {
    state
        .source
        .index_by_code(&code)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Indice '{}' non trouve", code)))
}
