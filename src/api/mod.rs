//! HTTP API layer for Warden.
//!
//! Provides REST endpoints for login, token validation, and session
//! introspection.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
