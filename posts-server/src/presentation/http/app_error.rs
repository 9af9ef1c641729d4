use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorResponseDto {
    pub(crate) error: String,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Body {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Domain(DomainError::PostNotFound { .. } | DomainError::NoPosts) => {
                StatusCode::NOT_FOUND
            }
            AppError::Domain(DomainError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Body { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = ?self, "request rejected");
        }

        let body = ErrorResponseDto {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
