use crate::rest::error::CustomError;
use crate::store::{SharedStore, DEFAULT_PAGE_LIMIT};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use users_sdk::models::user::{User, UserCreate, UserId, UserUpdate};

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    skip: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/search/{query}", get(search_users))
        .with_state(store)
}

async fn get_users(
    State(store): State<SharedStore>,
    Query(pagination): Query<Pagination>,
) -> Json<Vec<User>> {
    let store = store.read().await;
    Json(store.list(pagination.skip, pagination.limit))
}

async fn get_user(
    State(store): State<SharedStore>,
    Path(user_id): Path<UserId>,
) -> Result<Json<User>, CustomError> {
    let store = store.read().await;
    store
        .get(user_id)
        .map(Json)
        .ok_or(CustomError::UserNotFound(user_id))
}

async fn create_user(
    State(store): State<SharedStore>,
    Json(command): Json<UserCreate>,
) -> (StatusCode, Json<User>) {
    let mut store = store.write().await;
    let user = store.create(&command.name, &command.email);
    (StatusCode::CREATED, Json(user))
}

async fn update_user(
    State(store): State<SharedStore>,
    Path(user_id): Path<UserId>,
    Json(command): Json<UserUpdate>,
) -> Result<Json<User>, CustomError> {
    let mut store = store.write().await;
    store
        .update(user_id, &command)
        .map(Json)
        .ok_or(CustomError::UserNotFound(user_id))
}

async fn delete_user(
    State(store): State<SharedStore>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Value>, CustomError> {
    let mut store = store.write().await;
    if !store.delete(user_id) {
        return Err(CustomError::UserNotFound(user_id));
    }

    Ok(Json(json!({ "message": "User deleted successfully" })))
}

async fn search_users(
    State(store): State<SharedStore>,
    Path(query): Path<String>,
) -> Json<Vec<User>> {
    let store = store.read().await;
    Json(store.search(&query))
}
