//! Error types for Warden.
//!
//! Defines a unified error type that maps cleanly to HTTP responses.
//! Every authentication failure is a structured outcome; the response body
//! never reveals which half of a credential pair was wrong.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error type for Warden operations.
#[derive(Debug, Error)]
pub enum WardenError {
    /// Server-side credentials or signing key are missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Wrong identity or secret. Deliberately carries no detail.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Too many login attempts within the window.
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: i64 },

    /// No token presented, or the Bearer prefix was missing.
    #[error("Missing authorization token")]
    Unauthenticated,

    /// Token failed to parse or its signature did not check out.
    #[error("Malformed token")]
    MalformedToken,

    /// Token was valid but its expiry has passed.
    #[error("Token expired")]
    ExpiredToken,

    /// Valid token, insufficient role.
    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body for API clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_secs: Option<i64>,
}

impl IntoResponse for WardenError {
    fn into_response(self) -> Response {
        let (status, code, message, retry_after) = match &self {
            WardenError::Configuration(msg) => {
                // Log the actual problem but keep the response generic
                tracing::error!(error = %msg, "Authentication configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIG_ERROR",
                    "Authentication is not configured".to_string(),
                    None,
                )
            }
            WardenError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials. Please check your email and password.".to_string(),
                None,
            ),
            WardenError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "Too many login attempts. Please try again later.".to_string(),
                Some(*retry_after_secs),
            ),
            WardenError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN",
                "Missing authorization token".to_string(),
                None,
            ),
            WardenError::MalformedToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token".to_string(),
                None,
            ),
            WardenError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "EXPIRED_TOKEN",
                "Invalid or expired token".to_string(),
                None,
            ),
            WardenError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Insufficient permissions".to_string(),
                None,
            ),
            WardenError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None)
            }
            WardenError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            retry_after_secs: retry_after,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

/// Result type alias for Warden operations.
pub type WardenResult<T> = Result<T, WardenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_carries_retry_after_header() {
        let response = WardenError::RateLimited {
            retry_after_secs: 42,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            &HeaderValue::from_static("42")
        );
    }

    #[test]
    fn test_malformed_and_expired_share_a_message() {
        // Distinct codes for logging, identical user-visible text.
        let malformed = WardenError::MalformedToken.into_response();
        let expired = WardenError::ExpiredToken.into_response();
        assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
    }
}
