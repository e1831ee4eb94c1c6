//! # API Response Envelope & Error Contract
//!
//! Every endpoint answers with a flat JSON object carrying a `success` flag.
//! On success the payload fields sit next to it:
//!
//! ```json
//! { "success": true, "description": "...", "model_used": "..." }
//! ```
//!
//! On error the object carries a human-readable `error` and a
//! machine-readable `code`:
//!
//! ```json
//! { "success": false, "error": "Authentication required", "code": "unauthorized" }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::GlanceError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
/// Each variant maps to a fixed HTTP status code via [`ErrorCode::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Missing or malformed input, unsupported file type, or nothing could
    /// be extracted from the document. HTTP 400.
    InvalidRequest,
    /// No valid session, or the login credentials were rejected. HTTP 401.
    Unauthorized,
    /// The model call failed or no model is configured. HTTP 500.
    AnalysisFailed,
    /// An unexpected server-side error occurred. Internal details are never
    /// leaked to the client. HTTP 500.
    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::AnalysisFailed | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::AnalysisFailed => write!(f, "analysis_failed"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

/// Error body as documented in the OpenAPI schema.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Always `false`.
    pub success: bool,
    /// Human-readable description safe to display to end users.
    pub error: String,
    pub code: ErrorCode,
}

/// Response envelope.
///
/// `data` must serialize as a JSON object; its fields are flattened next to
/// `success`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,

    /// HTTP status to use in the response. Not serialized on the wire.
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
            status: StatusCode::OK,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: Some(code),
            status: code.status(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response");
                let body = serde_json::json!({
                    "success": false,
                    "error": "An internal error occurred",
                    "code": "internal_error"
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<GlanceError> for ApiResponse<T> {
    /// Convert a [`GlanceError`] into an error envelope.
    ///
    /// Internal error details are **never** leaked to the client. For
    /// `internal_error` responses, a generic message is returned and the
    /// real error is logged via `tracing::error!`.
    fn from(err: GlanceError) -> Self {
        match err {
            GlanceError::Validation(msg) | GlanceError::Extraction(msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg)
            }

            GlanceError::UnsupportedFileType(_) => {
                ApiResponse::error(ErrorCode::InvalidRequest, err.to_string())
            }

            GlanceError::Json(ref e) => {
                ApiResponse::error(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}"))
            }

            GlanceError::Unauthorized | GlanceError::InvalidCredentials => {
                ApiResponse::error(ErrorCode::Unauthorized, err.to_string())
            }

            GlanceError::Analysis(msg) => ApiResponse::error(ErrorCode::AnalysisFailed, msg),

            GlanceError::AnalysisUnavailable(ref reason) => {
                tracing::error!(reason = %reason, "Analysis requested but no model is available");
                ApiResponse::error(ErrorCode::AnalysisFailed, "Analysis service is unavailable")
            }

            ref internal @ (GlanceError::Drive(_)
            | GlanceError::Http(_)
            | GlanceError::Io(_)
            | GlanceError::Image(_)
            | GlanceError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}
