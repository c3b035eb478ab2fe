use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::PipelineError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Two-class failure surface: the client's fault or ours
#[derive(Debug)]
pub enum ApiError {
    BadRequest { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(cause: impl std::fmt::Display) -> Self {
        ApiError::BadRequest {
            message: format!("Audio conversion failed: {}", cause),
        }
    }

    /// The form itself is unusable, before any audio is looked at
    pub fn invalid_upload(cause: impl std::fmt::Display) -> Self {
        ApiError::BadRequest {
            message: format!("Invalid upload: {}", cause),
        }
    }

    pub fn internal(cause: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            message: format!("An unexpected error occurred: {}", cause),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(error: PipelineError) -> Self {
        if error.is_client_error() {
            ApiError::bad_request(error)
        } else {
            ApiError::internal(error)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
