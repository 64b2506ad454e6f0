mod error;
mod users;

use crate::server_error::ServerError;
use crate::shutdown::shutdown_signal;
use crate::store::SharedStore;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::info;

pub async fn start(address: &str, store: SharedStore) -> Result<(), ServerError> {
    let listener = TcpListener::bind(address).await?;
    info!("Started REST API on: {:?}", listener.local_addr()?);
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("REST API has stopped.");
    Ok(())
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(users::router(store))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "User Management REST API", "protocol": "REST" }))
}
