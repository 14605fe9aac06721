use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use super::models::{ErrorDetail, ErrorResponse};
use super::path_strings;
use crate::pipeline::PipelineError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("malformed request body: {0}")]
    Decode(#[from] JsonRejection),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Decode(_) => (StatusCode::BAD_REQUEST, "DECODE_ERROR"),
            ApiError::Pipeline(err) => match err {
                PipelineError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
                PipelineError::RemoteUnavailable(_) => (StatusCode::BAD_GATEWAY, "REMOTE_UNAVAILABLE"),
                PipelineError::TaskFailures { .. } => (StatusCode::BAD_GATEWAY, "TASK_FAILURES"),
                PipelineError::DeadlineExceeded { .. } => {
                    (StatusCode::GATEWAY_TIMEOUT, "DEADLINE_EXCEEDED")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let downloaded = match &self {
            ApiError::Pipeline(err @ PipelineError::TaskFailures { .. }) => {
                Some(path_strings(err.downloaded()))
            }
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                downloaded,
            },
        };

        (status, Json(body)).into_response()
    }
}
