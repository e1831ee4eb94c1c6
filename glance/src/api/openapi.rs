use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Glance API",
        version = "0.1.0",
        description = "Image and document analysis backed by a hosted generative model.",
    ),
    paths(
        handlers::health::health_check,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::check_auth,
        handlers::analyze::analyze_image,
        handlers::analyze::analyze_document,
    ),
    components(schemas(
        response::ErrorCode,
        response::ApiError,
        crate::auth::Identity,
        dto::LoginRequest,
        dto::LoginResponse,
        dto::MessageResponse,
        dto::CheckAuthResponse,
        dto::AnalyzeImageRequest,
        dto::AnalyzeImageResponse,
        dto::AnalyzeDocumentRequest,
        dto::AnalyzeDocumentResponse,
        dto::HealthResponse,
        dto::LlmStatus,
        dto::DriveStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "auth", description = "Session login and logout"),
        (name = "analysis", description = "Image and document analysis (session required)"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            utoipa::openapi::security::SecurityScheme::ApiKey(
                utoipa::openapi::security::ApiKey::Cookie(
                    utoipa::openapi::security::ApiKeyValue::new(crate::auth::SESSION_COOKIE),
                ),
            ),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
