//! Warden - single-credential admin gateway
//!
//! Gates access to an administrative backend with one statically-configured
//! credential pair, signed bearer tokens, and login rate limiting.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod error;
mod logging;

use crate::api::build_router;
use crate::auth::{AdminCredentials, AuthGate, LoginRateLimiter, TokenService};
use crate::config::Config;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The authentication gate.
    pub gate: AuthGate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    // This is optional and won't fail if .env doesn't exist
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Initialize logging
    logging::init();

    tracing::info!("Starting Warden v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let lifetime = config::parse_lifetime(&config.auth.token_lifetime)
        .map_err(|e| anyhow::anyhow!("Invalid token_lifetime: {}", e))?;

    // Build the authentication gate
    let credentials = AdminCredentials::from_config(&config.auth);
    let tokens = TokenService::new(&config.auth.jwt_secret, lifetime);
    let limiter = Arc::new(LoginRateLimiter::new(config.auth.rate_limit.clone()));

    if credentials.is_complete() && tokens.is_configured() {
        tracing::info!(
            identity = %credentials.email,
            token_lifetime_secs = lifetime.num_seconds(),
            rate_limit_attempts = config.auth.rate_limit.max_attempts,
            rate_limit_window_secs = config.auth.rate_limit.window_secs,
            "Authentication configured"
        );
    } else {
        // Startup proceeds; every authentication attempt will report a
        // configuration error until the credentials are provided.
        tracing::warn!("Admin credentials or signing key missing - authentication will refuse all requests");
    }

    let gate = AuthGate::new(credentials, tokens, limiter);

    // Build application state and router
    let state = AppState { gate };
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
