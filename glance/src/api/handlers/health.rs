use axum::extract::State;

use crate::api::dto::{DriveStatus, HealthResponse, LlmStatus};
use crate::api::response::ApiResponse;
use crate::api::AppState;

/// `GET /api/health`
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthResponse> {
    let llm = if state.analyzer.is_available() {
        LlmStatus {
            status: "available".to_string(),
            provider: state
                .llm_backend
                .as_ref()
                .map(|backend| backend.as_str().to_string()),
            model: Some(state.analyzer.model_name().to_string()),
        }
    } else {
        LlmStatus {
            status: "unavailable".to_string(),
            provider: None,
            model: None,
        }
    };

    ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        message: "Image Analysis API is running".to_string(),
        authentication: "enabled".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm,
        drive: DriveStatus {
            enabled: state.drive.is_enabled(),
        },
    })
}
