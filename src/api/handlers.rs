//! HTTP request handlers.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    Extension, Json,
};

use crate::api::types::*;
use crate::auth::Claims;
use crate::error::{WardenError, WardenResult};
use crate::AppState;

// ==================== Authentication Endpoints ====================

/// Login with the configured admin credential pair.
///
/// POST /v1/auth/login
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many login attempts"),
        (status = 500, description = "Authentication not configured")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<LoginRequest>,
) -> WardenResult<Json<LoginResponse>> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(WardenError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let client_key = addr.ip().to_string();
    let session = state
        .gate
        .login(&client_key, &request.email, &request.password)?;

    Ok(Json(LoginResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in,
        identity: session.identity,
        role: session.role.to_string(),
    }))
}

/// Validate the presented bearer token.
///
/// GET /v1/auth/validate
#[utoipa::path(
    get,
    path = "/v1/auth/validate",
    responses(
        (status = 200, description = "Token is valid", body = ValidateResponse),
        (status = 401, description = "Missing, malformed, or expired token")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn validate(Extension(claims): Extension<Claims>) -> Json<ValidateResponse> {
    Json(ValidateResponse {
        identity: claims.sub,
        role: claims.role.to_string(),
        expires_at: claims.exp,
    })
}

/// Profile of the authenticated admin, derived purely from the token.
///
/// GET /v1/auth/profile
#[utoipa::path(
    get,
    path = "/v1/auth/profile",
    responses(
        (status = 200, description = "Authenticated profile", body = ProfileResponse),
        (status = 401, description = "Missing, malformed, or expired token"),
        (status = 403, description = "Insufficient role")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn profile(Extension(claims): Extension<Claims>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        identity: claims.sub,
        role: claims.role.to_string(),
        issued_at: claims.iat,
        expires_at: claims.exp,
    })
}

/// Logout acknowledgement.
///
/// Tokens are self-contained and never stored server-side, so there is
/// nothing to invalidate; clients simply discard the token. This endpoint
/// does not consult the authentication gate.
///
/// POST /v1/auth/logout
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse)
    ),
    tag = "auth"
)]
pub async fn logout() -> Json<LogoutResponse> {
    Json(LogoutResponse {
        message: "Logged out".to_string(),
    })
}

/// Session introspection; anonymous callers get a 200 as well.
///
/// GET /v1/auth/session
#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Session state", body = SessionResponse)
    ),
    tag = "auth"
)]
pub async fn session(claims: Option<Extension<Claims>>) -> Json<SessionResponse> {
    match claims {
        Some(Extension(claims)) => Json(SessionResponse {
            authenticated: true,
            identity: Some(claims.sub),
            role: Some(claims.role.to_string()),
        }),
        None => Json(SessionResponse {
            authenticated: false,
            identity: None,
            role: None,
        }),
    }
}

// ==================== Health ====================

/// Health check.
///
/// GET /v1/health
#[utoipa::path(
    get,
    path = "/v1/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
