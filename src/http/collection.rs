use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;

use crate::AppState;

use super::content_type::content_type;
use super::{ApiError, TransactionQuery};

pub(super) async fn index(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.collections.index())
}

pub(super) async fn create(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
    headers: HeaderMap,
    body: String,
) -> Result<String, ApiError> {
    let mimetype = content_type(&headers);
    Ok(state
        .collections
        .create(&body, &mimetype, &query.transaction_id)
        .await?)
}
