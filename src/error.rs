//! Error types for the bookstore server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Either a single message or the list of schema violations
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    List(Vec<String>),
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    /// A string, or an array of strings for validation failures
    #[schema(value_type = Object)]
    pub message: ErrorMessage,
    pub status: u16,
}

/// Error response body
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Json(rejection) => rejection.status(),
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            AppError::Validation(messages) => ErrorMessage::List(messages),
            AppError::NotFound(msg) => ErrorMessage::Single(msg),
            AppError::Json(rejection) => ErrorMessage::Single(rejection.body_text()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ErrorMessage::Single("Database error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorBody {
                message,
                status: status.as_u16(),
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
