//! Error types for each layer of the server.
//!
//! # Design
//! `TodoError` is what the service returns: a missing row is its own variant
//! so it never gets confused with a driver failure. `ApiError` wraps it for
//! the HTTP layer and adds request-shape failures (bad path id, bad JSON).
//! Storage details are logged and replaced by a generic message before they
//! reach a client.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Failures surfaced by `TodoService`.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Todo not found with id: {id}")]
    NotFound { id: i64 },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Failures surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be interpreted (path variable or body).
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Todo(#[from] TodoError),
}

/// JSON body returned with every error status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Todo(TodoError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Todo(TodoError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Todo(TodoError::Storage(err)) => {
                error!(error = %err, "storage failure while handling request");
                "Internal server error".to_string()
            }
            other => {
                warn!(status = status.as_u16(), error = %other, "request rejected");
                other.to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Failures that stop the process before it starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open datasource: {0}")]
    Datasource(#[from] sqlx::Error),

    #[error("failed to apply migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}
