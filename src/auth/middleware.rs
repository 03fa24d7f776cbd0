//! Authentication middleware for axum.
//!
//! `require_auth` validates the bearer token and attaches the decoded
//! claims to the request; `require_admin` composes a role check on top;
//! `optional_auth` attaches claims when present but never rejects.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthGate, Claims};
use crate::error::{WardenError, WardenResult};

fn authorization_header(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Require a valid bearer token.
///
/// On success the decoded [`Claims`] are inserted into request extensions
/// for downstream handlers. All failures map to 401, but the absent,
/// malformed, and expired cases keep their distinct codes and log lines.
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut request: Request<Body>,
    next: Next,
) -> WardenResult<Response> {
    let claims = gate
        .authenticate(authorization_header(&request))
        .map_err(|e| {
            tracing::debug!(reason = %e, "Request authentication failed");
            e
        })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Require the administrative role. Composed after [`require_auth`].
pub async fn require_admin(request: Request<Body>, next: Next) -> WardenResult<Response> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or(WardenError::Unauthenticated)?;

    AuthGate::authorize_admin(claims)?;

    Ok(next.run(request).await)
}

/// Populate claims when a valid token is presented, without ever failing.
///
/// Lets a route serve authenticated and anonymous callers differently.
pub async fn optional_auth(
    State(gate): State<AuthGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(claims) = gate.authenticate_optional(authorization_header(&request)) {
        request.extensions_mut().insert(claims);
    }

    next.run(request).await
}
