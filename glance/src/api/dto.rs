//! Request and response bodies for the `/api` endpoints.
//!
//! Response payloads are flattened next to `"success": true` by
//! [`ApiResponse`](super::response::ApiResponse).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Identity;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: Identity,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

/// JSON form of an image analysis request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AnalyzeImageRequest {
    /// Base64 data URL, e.g. `data:image/png;base64,iVBORw0...`
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyzeImageResponse {
    pub description: String,
    pub model_used: String,
}

/// JSON form of a document analysis request. File uploads use
/// `multipart/form-data` with a `file` field instead.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AnalyzeDocumentRequest {
    pub url: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalyzeDocumentResponse {
    pub summary: String,
    /// One of `PDF`, `DOCX`, `URL`, `Google Drive`, `Text`.
    pub source_type: String,
    /// Characters of extracted content sent to the model.
    pub content_length: usize,
    pub model_used: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub authentication: String,
    pub version: String,
    pub llm: LlmStatus,
    pub drive: DriveStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LlmStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DriveStatus {
    pub enabled: bool,
}
