use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::require_session;
use super::openapi;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    // Cookies require a concrete origin, so the caller's origin is echoed.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let body_limit = state.config.server.max_upload_bytes;

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/check-auth", get(handlers::check_auth))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router());

    let protected_routes = Router::new()
        .route("/analyze-image", post(handlers::analyze_image))
        .route("/analyze-document", post(handlers::analyze_document))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
