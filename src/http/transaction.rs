use axum::extract::{Path, State};

use crate::AppState;

use super::ApiError;

pub(super) async fn status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    Ok(state.transactions.status(&id).await?)
}

pub(super) async fn create(State(state): State<AppState>) -> Result<String, ApiError> {
    Ok(state.transactions.create().await?)
}

pub(super) async fn extend(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    Ok(state.transactions.extend(&id).await?)
}

pub(super) async fn commit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    Ok(state.transactions.commit(&id).await?)
}

pub(super) async fn rollback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    Ok(state.transactions.rollback(&id).await?)
}
