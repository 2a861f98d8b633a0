//! HTTP error responses and the mapping from [`NotesError`] to status codes.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::NotesError;

/// Error body sent to HTTP callers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Error kind, e.g. `MissingField` or `StorageError`
    pub error: String,
    /// Human-readable message naming the offending field or address
    pub message: String,
    #[serde(skip)]
    status: u16,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Status for each error class: bad input 400, missing note 404, storage 500.
pub fn status_for(err: &NotesError) -> StatusCode {
    match err {
        NotesError::NotFound(_) => StatusCode::NOT_FOUND,
        e if e.is_validation() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<NotesError> for ApiError {
    fn from(err: NotesError) -> Self {
        ApiError {
            error: err.kind().to_string(),
            message: err.to_string(),
            status: status_for(&err).as_u16(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let err = NotesError::InvalidBody(rejection.body_text());
        tracing::error!(kind = err.kind(), "{}", err);
        err.into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}
