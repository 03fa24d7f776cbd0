//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ==================== Authentication ====================

/// Login request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Admin email.
    #[serde(default)]
    pub email: String,
    /// Admin password.
    #[serde(default)]
    pub password: String,
}

/// Login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token.
    pub token: String,
    /// Token scheme for the Authorization header.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    /// Authenticated identity.
    pub identity: String,
    /// Granted role.
    pub role: String,
}

/// Token validation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateResponse {
    /// Identity embedded in the token.
    pub identity: String,
    /// Role embedded in the token.
    pub role: String,
    /// Expiration time (Unix timestamp).
    pub expires_at: i64,
}

/// Profile response, derived purely from the verified token payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// Identity embedded in the token.
    pub identity: String,
    /// Role embedded in the token.
    pub role: String,
    /// Issued at time (Unix timestamp).
    pub issued_at: i64,
    /// Expiration time (Unix timestamp).
    pub expires_at: i64,
}

/// Logout acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Session introspection for authenticated or anonymous callers.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// Whether a valid token accompanied the request.
    pub authenticated: bool,
    /// Identity, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Role, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Timestamp.
    pub timestamp: String,
}
