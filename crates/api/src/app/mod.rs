//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared codec and user store
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use studentapp_auth::AuthConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(auth: AuthConfig) -> Router {
    build_app_with(Arc::new(services::AppServices::new(&auth)))
}

pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        authenticator: services.authenticator(),
    };

    // The middleware wraps every route, public ones included; it only ever
    // fills the security context and never answers a request itself.
    Router::new()
        .route("/health", get(routes::system::health))
        .route("/actuator/health", get(routes::system::actuator_health))
        .nest("/api", routes::router())
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
}
