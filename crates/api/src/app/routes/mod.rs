use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod system;

/// Router for everything under `/api`.
///
/// The credential endpoints are public; any handler taking
/// [`CurrentUser`](crate::context::CurrentUser) requires a principal.
pub fn router() -> Router {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/me", get(system::whoami))
}
