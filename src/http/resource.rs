use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;

use crate::AppState;
use crate::error::Error;
use crate::fedora::to_ntriples;
use crate::sparqlizer::Node;

use super::content_type::{APPLICATION_N_TRIPLES, RdfBody, accept, content_type, is_node_record};
use super::{ApiError, TransactionQuery};

fn parse_node(body: &str) -> Result<Node, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError(Error::Malformed(e.to_string()).into()))
}

pub(super) async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<RdfBody, ApiError> {
    let response = state.resources.find(&id, &accept(&headers)).await?;
    Ok(RdfBody::relay(response))
}

pub(super) async fn find_graph(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<RdfBody, ApiError> {
    let graph = state.resources.find_graph(&id).await?;
    Ok(RdfBody {
        mimetype: Some(APPLICATION_N_TRIPLES.to_string()),
        body: to_ntriples(&graph),
    })
}

pub(super) async fn create(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
    headers: HeaderMap,
    body: String,
) -> Result<String, ApiError> {
    let mimetype = content_type(&headers);
    let tx = &query.transaction_id;
    if !body.is_empty() && is_node_record(&mimetype) {
        let node = parse_node(&body)?;
        return Ok(state.resources.node_create(&node, tx).await?);
    }
    Ok(state.resources.create(&body, &mimetype, tx).await?)
}

pub(super) async fn upsert(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TransactionQuery>,
    headers: HeaderMap,
    body: String,
) -> Result<String, ApiError> {
    let mimetype = content_type(&headers);
    let tx = &query.transaction_id;
    if is_node_record(&mimetype) {
        let node = parse_node(&body)?;
        return Ok(state.resources.node_upsert(&id, &node, tx).await?);
    }
    Ok(state.resources.upsert(&id, &body, &mimetype, tx).await?)
}

pub(super) async fn sparql_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TransactionQuery>,
    headers: HeaderMap,
    body: String,
) -> Result<String, ApiError> {
    let tx = &query.transaction_id;
    if is_node_record(&content_type(&headers)) {
        let node = parse_node(&body)?;
        return Ok(state.resources.node_sparql_update(&id, &node, tx).await?);
    }
    Ok(state.resources.sparql_update(&id, &body, tx).await?)
}

pub(super) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<TransactionQuery>,
) -> Result<String, ApiError> {
    Ok(state.resources.delete(&id, &query.transaction_id).await?)
}
