mod collection;
mod content_type;
mod resource;
mod transaction;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::signal::unix::{SignalKind, signal};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::AppState;
use crate::config::Config;
use crate::error::Error;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/islandora/resource/", post(resource::create))
        .route(
            "/islandora/resource/{id}",
            get(resource::find)
                .put(resource::upsert)
                .patch(resource::sparql_update)
                .delete(resource::delete),
        )
        .route("/islandora/resource/{id}/graph", get(resource::find_graph))
        .route("/islandora/transaction/", post(transaction::create))
        .route(
            "/islandora/transaction/{id}",
            get(transaction::status).post(transaction::extend),
        )
        .route("/islandora/transaction/{id}/commit", post(transaction::commit))
        .route(
            "/islandora/transaction/{id}/rollback",
            post(transaction::rollback),
        )
        .route(
            "/islandora/collection/",
            get(collection::index).post(collection::create),
        )
        // RDF bodies of any size go through to Fedora
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(target: "lifecycle", address = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let (Ok(mut sigterm), Ok(mut sigint)) = (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) else {
        error!(target: "lifecycle", "unable to install signal handlers");
        return std::future::pending().await;
    };
    tokio::select! {
        _ = sigterm.recv() => {
            info!(target: "lifecycle", "Received the terminate signal; stopping");
        }
        _ = sigint.recv() => {
            info!(target: "lifecycle", "Received the interrupt signal; stopping");
        }
    }
}

/// `?transaction_id=` on write routes; absent means no transaction.
#[derive(Deserialize, Default)]
#[serde(default)]
struct TransactionQuery {
    transaction_id: String,
}

struct ApiError(anyhow::Error);

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.downcast_ref::<Error>() {
            Some(Error::Upstream { url, status, body }) => {
                warn!(target: "http", %url, %status, "upstream failure");
                (*status, body.clone()).into_response()
            }
            Some(error) => {
                warn!(target: "http", %error, "request failed");
                (error.status(), error.to_string()).into_response()
            }
            None => {
                error!(target: "http", error = ?self.0, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", self.0)).into_response()
            }
        }
    }
}
