use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::SpeechClientError;
use crate::application::services::TranscriptionError;
use crate::presentation::extract::UploadError;

/// Failures surfaced at the request boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Use POST with raw audio/video bytes or a multipart form")]
    MethodNotAllowed,
    #[error("{0}")]
    MalformedUpload(String),
    #[error("upload exceeds the configured size limit")]
    PayloadTooLarge,
    #[error("speech service error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MalformedUpload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::TooLarge => ApiError::PayloadTooLarge,
            other => ApiError::MalformedUpload(other.to_string()),
        }
    }
}

impl From<TranscriptionError> for ApiError {
    fn from(error: TranscriptionError) -> Self {
        match error {
            TranscriptionError::Speech(SpeechClientError::Upstream { status, message }) => {
                ApiError::Upstream {
                    status: Some(status),
                    message,
                }
            }
            TranscriptionError::Speech(SpeechClientError::InvalidUpload(message)) => {
                ApiError::MalformedUpload(message)
            }
            TranscriptionError::Speech(SpeechClientError::MissingApiKey) => {
                ApiError::Internal(SpeechClientError::MissingApiKey.to_string())
            }
            TranscriptionError::Speech(other) => ApiError::Upstream {
                status: None,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let upstream_status = match &self {
            ApiError::Upstream { status, .. } => *status,
            _ => None,
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let mut response = (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                upstream_status,
            }),
        )
            .into_response();

        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("POST"));
        }

        response
    }
}
