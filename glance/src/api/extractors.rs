use axum::extract::multipart::{Field, MultipartError};
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;

use crate::error::GlanceError;
use crate::processing::DocumentInput;

use super::dto::{AnalyzeDocumentRequest, AnalyzeImageRequest};

pub const NO_IMAGE_ERROR: &str = "No image data provided";
pub const BODY_TOO_LARGE_ERROR: &str = "Request body exceeds the upload size limit";

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(GlanceError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for GlanceError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> GlanceError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return GlanceError::Validation(BODY_TOO_LARGE_ERROR.to_string());
    }
    match rejection {
        JsonRejection::JsonDataError(err) => {
            GlanceError::Validation(format!("Invalid JSON: {}", err.body_text()))
        }
        JsonRejection::JsonSyntaxError(err) => {
            GlanceError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            GlanceError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(_) => {
            GlanceError::Validation("Failed to read request body".to_string())
        }
        _ => GlanceError::Validation(rejection.body_text()),
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
}

/// Oversized bodies surface as a multipart error once the limit is hit.
fn multipart_error(err: MultipartError, context: &str) -> GlanceError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return GlanceError::Validation(BODY_TOO_LARGE_ERROR.to_string());
    }
    GlanceError::Validation(format!("{context}: {err}"))
}

async fn read_bytes(field: Field<'_>) -> Result<Vec<u8>, GlanceError> {
    field
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e| multipart_error(e, "Failed to read file"))
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String, GlanceError> {
    field
        .text()
        .await
        .map_err(|e| multipart_error(e, &format!("Invalid {name} field")))
}

/// Image sent to `/api/analyze-image`, either as an uploaded file or as a
/// base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePayload {
    Bytes(Vec<u8>),
    DataUrl(String),
}

impl<S> FromRequest<S> for ImagePayload
where
    S: Send + Sync,
{
    type Rejection = GlanceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let AppJson(body) = AppJson::<AnalyzeImageRequest>::from_request(req, state).await?;
            return body
                .image
                .map(ImagePayload::DataUrl)
                .ok_or_else(|| GlanceError::Validation(NO_IMAGE_ERROR.to_string()));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| GlanceError::Validation(format!("Invalid multipart body: {e}")))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "Invalid multipart body"))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name != "file" && name != "image" {
                continue;
            }

            let is_upload = field.file_name().is_some();
            let bytes = read_bytes(field).await?;

            if !is_upload && bytes.starts_with(b"data:image/") {
                let data_url = String::from_utf8(bytes)
                    .map_err(|_| GlanceError::Validation(NO_IMAGE_ERROR.to_string()))?;
                return Ok(ImagePayload::DataUrl(data_url));
            }
            return Ok(ImagePayload::Bytes(bytes));
        }

        Err(GlanceError::Validation(NO_IMAGE_ERROR.to_string()))
    }
}

/// Document sent to `/api/analyze-document`. Holds `None` when the request
/// carried none of `file`, `url` or `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPayload(pub Option<DocumentInput>);

impl<S> FromRequest<S> for DocumentPayload
where
    S: Send + Sync,
{
    type Rejection = GlanceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let AppJson(body) =
                AppJson::<AnalyzeDocumentRequest>::from_request(req, state).await?;
            return Ok(DocumentPayload(DocumentInput::from_parts(
                None, body.url, body.text,
            )));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| GlanceError::Validation(format!("Invalid multipart body: {e}")))?;

        let mut file: Option<(String, Vec<u8>)> = None;
        let mut url: Option<String> = None;
        let mut text: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "Invalid multipart body"))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or("").to_string();
                    file = Some((filename, read_bytes(field).await?));
                }
                "url" => url = Some(read_text(field, "url").await?),
                "text" => text = Some(read_text(field, "text").await?),
                _ => {}
            }
        }

        Ok(DocumentPayload(DocumentInput::from_parts(file, url, text)))
    }
}
