use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use users_sdk::models::user::UserId;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("User with ID: {0} was not found")]
    UserNotFound(UserId),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for CustomError {
    fn into_response(self) -> Response {
        let status_code = match self {
            CustomError::UserNotFound(_) => StatusCode::NOT_FOUND,
        };
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status_code, Json(body)).into_response()
    }
}
