//! Route definitions for the API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::{optional_auth, require_admin, require_auth};
use crate::AppState;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login,
        handlers::validate,
        handlers::profile,
        handlers::logout,
        handlers::session,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::LoginRequest,
        crate::api::types::LoginResponse,
        crate::api::types::ValidateResponse,
        crate::api::types::ProfileResponse,
        crate::api::types::LogoutResponse,
        crate::api::types::SessionResponse,
        crate::api::types::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Admin authentication endpoints"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Warden API",
        version = "0.1.0",
        description = "Admin gateway - single-credential authentication with signed bearer tokens",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router.
///
/// Routes are grouped by the middleware they sit behind: token-protected,
/// admin-role-protected, optionally-authenticated, and public.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes requiring a valid bearer token
    let protected_routes = Router::new()
        .route("/v1/auth/validate", get(handlers::validate))
        .layer(middleware::from_fn_with_state(
            state.gate.clone(),
            require_auth,
        ));

    // Routes additionally requiring the admin role
    let admin_routes = Router::new()
        .route("/v1/auth/profile", get(handlers::profile))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            state.gate.clone(),
            require_auth,
        ));

    // Routes that attach claims when present but never reject
    let optional_routes = Router::new()
        .route("/v1/auth/session", get(handlers::session))
        .layer(middleware::from_fn_with_state(
            state.gate.clone(),
            optional_auth,
        ));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/v1/auth/login", post(handlers::login))
        .route("/v1/auth/logout", post(handlers::logout))
        .route("/v1/health", get(handlers::health_check));

    Router::new()
        .merge(protected_routes)
        .merge(admin_routes)
        .merge(optional_routes)
        .merge(public_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
