//! Login, logout and session status.

use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::api::dto::{CheckAuthResponse, LoginRequest, LoginResponse, MessageResponse};
use crate::api::extractors::AppJson;
use crate::api::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::auth::SESSION_COOKIE;
use crate::error::GlanceError;

fn session_cookie(id: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
        .build()
}

/// `POST /api/login`
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = LoginResponse),
        (status = 400, description = "Username or password missing", body = ApiError),
        (status = 401, description = "Invalid credentials", body = ApiError),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<LoginResponse>), GlanceError> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(GlanceError::Validation(
            "Username and password are required".to_string(),
        ));
    };

    let Some(identity) = state.credentials.verify(&username, &password).await else {
        tracing::info!(username = %username, "Rejected login attempt");
        return Err(GlanceError::InvalidCredentials);
    };

    if let Some(previous) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(previous.value()).await;
    }

    let session_id = state.sessions.create(identity.clone()).await;
    let jar = jar.add(session_cookie(
        session_id,
        state.config.server.session_cookie_secure,
    ));

    tracing::info!(username = %identity.username, role = %identity.role, "User logged in");

    Ok((
        jar,
        ApiResponse::success(LoginResponse {
            message: "Login successful".to_string(),
            user: identity,
        }),
    ))
}

/// `POST /api/logout`
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cleared", body = MessageResponse),
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiResponse<MessageResponse>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    (
        jar,
        ApiResponse::success(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    )
}

/// `GET /api/check-auth`
#[utoipa::path(
    get,
    path = "/api/check-auth",
    tag = "auth",
    responses(
        (status = 200, description = "Whether the caller holds a live session", body = CheckAuthResponse),
    )
)]
pub async fn check_auth(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResponse<CheckAuthResponse> {
    let session = match jar.get(SESSION_COOKIE) {
        Some(cookie) => state.sessions.get(cookie.value()).await,
        None => None,
    };

    ApiResponse::success(CheckAuthResponse {
        authenticated: session.is_some(),
        user: session.map(|s| s.identity),
    })
}
