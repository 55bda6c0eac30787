//! Errors surfaced to HTTP callers

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::{api::responses::ErrorResponse, repository::RepositoryError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("coffee {0} not found")]
    NotFound(i64),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("expected request with `Content-Type: application/json`")]
    UnsupportedMediaType,
    #[error("only application/json responses are available")]
    NotAcceptable,
    /// The request body could not be read, e.g. it exceeds the size limit
    #[error("{message}")]
    Body { status: StatusCode, message: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            Self::Body { status, .. } => *status,
            Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::UnsupportedMediaType,
            JsonRejection::BytesRejection(rejection) => Self::Body {
                status: rejection.status(),
                message: rejection.body_text(),
            },
            other => Self::Validation(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
