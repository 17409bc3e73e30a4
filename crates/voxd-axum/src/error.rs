//! Error → HTTP status mapping.
//!
//! Every error response carries a JSON body of the form
//! `{ "detail": "<message>" }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use voxd_core::SynthesisError;

/// Transport-level error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Invalid request input.
    #[error("{0}")]
    BadRequest(String),

    /// Requested resource (voice model) cannot be served.
    #[error("{0}")]
    NotFound(String),

    /// Synthesis failed server-side.
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<SynthesisError> for HttpError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::InvalidRequest(msg) => Self::BadRequest(msg),
            SynthesisError::ModelUnavailable { model, reason } => {
                Self::NotFound(format!("voice model '{model}' unavailable: {reason}"))
            }
            SynthesisError::SynthesisFailed(msg) => {
                Self::Internal(format!("synthesis failed: {msg}"))
            }
        }
    }
}
