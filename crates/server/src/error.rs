//! Mapping of domain errors onto HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::StoreError;
use log::{error, warn};
use scheduler::SchedulingError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthorized,
    #[error("administrator access required")]
    Forbidden,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Scheduling(err.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<models::patch::PatchError> for AppError {
    fn from(err: models::patch::PatchError) -> Self {
        Self::Scheduling(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Scheduling(e) => match e {
                SchedulingError::InvalidTerm(_) => (StatusCode::BAD_REQUEST, "INVALID_TERM"),
                SchedulingError::InvalidYear(_) => (StatusCode::BAD_REQUEST, "INVALID_YEAR"),
                SchedulingError::Validation(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
                SchedulingError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                SchedulingError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
                SchedulingError::GenerationService(_) => {
                    (StatusCode::BAD_GATEWAY, "GENERATION_FAILED")
                }
                SchedulingError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
                SchedulingError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            },
        };

        // store failures may carry backend details, so the caller gets a fixed message
        let message = match &self {
            AppError::Scheduling(SchedulingError::Store(detail)) => {
                error!("Store failure: {detail}");
                "internal storage error".to_string()
            }
            other if status.is_server_error() => {
                error!("{other}");
                other.to_string()
            }
            other => {
                warn!("{status}: {other}");
                other.to_string()
            }
        };

        (status, Json(ApiError::new(code, message))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
