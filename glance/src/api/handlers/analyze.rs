//! Image and document analysis.
//!
//! Both endpoints sit behind [`require_session`](crate::api::middleware::require_session).
//! Input problems and extraction failures answer 400; a failed model call
//! answers 500 with a generic message while the cause is logged.

use axum::extract::State;

use crate::api::dto::{
    AnalyzeDocumentRequest, AnalyzeDocumentResponse, AnalyzeImageRequest, AnalyzeImageResponse,
};
use crate::api::extractors::{DocumentPayload, ImagePayload};
use crate::api::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::error::GlanceError;
use crate::llm::prompts::{document_analysis_prompt, image_analysis_prompt};
use crate::llm::PreparedImage;
use crate::processing::ExtractionResult;

fn analysis_failure(context: &'static str) -> impl FnOnce(GlanceError) -> GlanceError {
    move |err| match err {
        GlanceError::Validation(_) => err,
        other => {
            tracing::error!(error = %other, "{context}");
            GlanceError::Analysis(context.to_string())
        }
    }
}

/// `POST /api/analyze-image`
///
/// Accepts `multipart/form-data` with a `file` (or `image`) field, or JSON
/// `{"image": "data:image/...;base64,..."}`.
#[utoipa::path(
    post,
    path = "/api/analyze-image",
    tag = "analysis",
    request_body(content = AnalyzeImageRequest, description = "Base64 data URL, or multipart `file`"),
    responses(
        (status = 200, description = "Model description of the image", body = AnalyzeImageResponse),
        (status = 400, description = "No image or undecodable image", body = ApiError),
        (status = 401, description = "No session", body = ApiError),
        (status = 500, description = "Analysis failed", body = ApiError),
    ),
    security(("session_cookie" = []))
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    payload: ImagePayload,
) -> Result<ApiResponse<AnalyzeImageResponse>, GlanceError> {
    let image = tokio::task::spawn_blocking(move || match payload {
        ImagePayload::DataUrl(data_url) => PreparedImage::from_data_url(&data_url),
        ImagePayload::Bytes(bytes) => PreparedImage::from_bytes(&bytes),
    })
    .await
    .map_err(|e| GlanceError::Internal(format!("Image preparation task failed: {e}")))??;

    let (width, height) = image.dimensions();
    tracing::info!(width, height, model = %state.analyzer.model_name(), "Analyzing image");

    let description = state
        .analyzer
        .analyze_image(&image_analysis_prompt(), &image)
        .await
        .map_err(analysis_failure("Failed to analyze image"))?;

    Ok(ApiResponse::success(AnalyzeImageResponse {
        description,
        model_used: state.analyzer.model_name().to_string(),
    }))
}

/// `POST /api/analyze-document`
///
/// Accepts `multipart/form-data` with a `file`, `url` or `text` field, or
/// JSON `{"url": ...}` / `{"text": ...}`. When several are given the file
/// wins, then the URL.
#[utoipa::path(
    post,
    path = "/api/analyze-document",
    tag = "analysis",
    request_body(content = AnalyzeDocumentRequest, description = "URL or text as JSON, or multipart `file`/`url`/`text`"),
    responses(
        (status = 200, description = "Model analysis of the document", body = AnalyzeDocumentResponse),
        (status = 400, description = "No input, unsupported file type, or nothing extracted", body = ApiError),
        (status = 401, description = "No session", body = ApiError),
        (status = 500, description = "Analysis failed", body = ApiError),
    ),
    security(("session_cookie" = []))
)]
pub async fn analyze_document(
    State(state): State<AppState>,
    DocumentPayload(input): DocumentPayload,
) -> Result<ApiResponse<AnalyzeDocumentResponse>, GlanceError> {
    let (content, source_type, content_length) =
        match state.processor.process_optional(input).await {
            ExtractionResult::Success {
                content,
                source_type,
                content_length,
            } => (content, source_type, content_length),
            ExtractionResult::Failure { error } => {
                tracing::info!(error = %error, "Document extraction failed");
                return Err(GlanceError::Extraction(error));
            }
        };

    tracing::info!(
        source_type = %source_type,
        content_length,
        model = %state.analyzer.model_name(),
        "Analyzing document"
    );

    let summary = state
        .analyzer
        .analyze_text(&document_analysis_prompt(&content, source_type))
        .await
        .map_err(analysis_failure("Failed to analyze document"))?;

    Ok(ApiResponse::success(AnalyzeDocumentResponse {
        summary,
        source_type: source_type.to_string(),
        content_length,
        model_used: state.analyzer.model_name().to_string(),
    }))
}
