//! # Session Middleware
//!
//! Guards the analysis routes. The `glance_session` cookie must name a live
//! session in the [`SessionStore`](crate::auth::SessionStore); otherwise the
//! request is answered with 401 and never reaches the handler.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::SESSION_COOKIE;

use super::response::{ApiResponse, ErrorCode};
use super::state::AppState;

/// On success the session's [`Identity`](crate::auth::Identity) is inserted
/// into the request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let session = match jar.get(SESSION_COOKIE) {
        Some(cookie) => state.sessions.get(cookie.value()).await,
        None => None,
    };

    match session {
        Some(session) => {
            request.extensions_mut().insert(session.identity);
            next.run(request).await
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "Rejected request without a valid session");
            ApiResponse::<()>::error(ErrorCode::Unauthorized, "Authentication required")
                .into_response()
        }
    }
}
