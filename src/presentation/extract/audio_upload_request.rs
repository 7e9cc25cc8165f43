use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{HeaderMap, StatusCode, header};
use bytes::Bytes;

use crate::domain::{AudioUpload, TranscriptionOptions};
use crate::presentation::error::ApiError;

use super::control_values::ControlValues;

pub const FILE_FIELD: &str = "file";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file found in request body")]
    MissingFile,
    #[error("{0}")]
    InvalidTask(String),
    #[error("Failed to read multipart: {0}")]
    Multipart(String),
    #[error("Failed to read request body: {0}")]
    Body(String),
    #[error("upload exceeds the configured size limit")]
    TooLarge,
}

impl From<MultipartRejection> for UploadError {
    fn from(rejection: MultipartRejection) -> Self {
        UploadError::Multipart(rejection.body_text())
    }
}

impl From<MultipartError> for UploadError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge
        } else {
            UploadError::Multipart(error.body_text())
        }
    }
}

impl From<BytesRejection> for UploadError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge
        } else {
            UploadError::Body(rejection.body_text())
        }
    }
}

/// An uploaded media file plus its control options.
///
/// `multipart/form-data` bodies are read field by field; any other body is
/// taken whole as the file. Control values come from form fields first,
/// then from the `x-task`, `x-language` and `x-want-srt` headers.
#[derive(Debug)]
pub struct AudioUploadRequest {
    pub audio: AudioUpload,
    pub options: TranscriptionOptions,
}

impl<S> FromRequest<S> for AudioUploadRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let header_values = ControlValues::from_headers(req.headers());

        let request = if is_multipart(req.headers()) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(UploadError::from)?;
            Self::from_multipart(multipart, header_values).await?
        } else {
            let content_type = content_type(req.headers());
            let body = Bytes::from_request(req, state)
                .await
                .map_err(UploadError::from)?;
            Self::from_raw(body, content_type, header_values)?
        };

        tracing::debug!(
            bytes = request.audio.len(),
            file_name = request.audio.file_name().unwrap_or("-"),
            task = %request.options.task,
            language = request.options.language.as_deref().unwrap_or("auto"),
            want_srt = request.options.want_srt,
            "Upload decoded"
        );

        Ok(request)
    }
}

impl AudioUploadRequest {
    async fn from_multipart(
        mut multipart: Multipart,
        header_values: ControlValues,
    ) -> Result<Self, UploadError> {
        let mut form_values = ControlValues::default();
        let mut audio: Option<AudioUpload> = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(String::from);

            // The `file` field wins over any earlier part that merely has a filename.
            let is_file = name == FILE_FIELD || (audio.is_none() && file_name.is_some());
            if is_file {
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await?;
                if let Some(upload) = AudioUpload::from_bytes(data) {
                    audio = Some(
                        upload
                            .with_file_name(file_name)
                            .with_content_type(content_type),
                    );
                }
                continue;
            }
            if file_name.is_some() {
                tracing::debug!(field = %name, "Ignoring additional file part");
                continue;
            }

            let value = field.text().await?;
            if !form_values.set_field(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }

        let audio = audio.ok_or(UploadError::MissingFile)?;
        let options = form_values.or(header_values).into_options()?;

        Ok(Self { audio, options })
    }

    fn from_raw(
        body: Bytes,
        content_type: Option<String>,
        header_values: ControlValues,
    ) -> Result<Self, UploadError> {
        let audio = AudioUpload::from_bytes(body)
            .ok_or(UploadError::MissingFile)?
            .with_content_type(content_type);
        let options = header_values.into_options()?;

        Ok(Self { audio, options })
    }
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

fn is_multipart(headers: &HeaderMap) -> bool {
    content_type(headers)
        .map(|ct| ct.trim().to_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}
