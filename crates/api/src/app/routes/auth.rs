use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use studentapp_auth::{CredentialError, CredentialVerifier, NewUser, hash_password};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn signup(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SignupRequest>,
) -> axum::response::Response {
    if body.password.trim().is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "password must not be blank",
        );
    }

    // Argon2 is CPU-bound; keep it off the async workers.
    let password = body.password;
    let password_hash = match tokio::task::spawn_blocking(move || hash_password(&password)).await {
        Ok(Ok(hash)) => hash,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "password hashing failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "registration_failed",
                "Registration failed. Please try again.",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "password hashing task failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "registration_failed",
                "Registration failed. Please try again.",
            );
        }
    };

    let new_user = NewUser {
        username: body.username,
        email: body.email,
        password_hash,
    };
    match services.users.insert(new_user).await {
        Ok(identity) => {
            (StatusCode::CREATED, Json(dto::signup_response(&identity))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let identity = match services.users.verify(&body.username, &body.password).await {
        Ok(identity) => identity,
        Err(CredentialError::InvalidCredentials) => {
            tracing::info!(username = %body.username, "login rejected");
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid username or password",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "credential check failed");
            return errors::json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "credential_store_unavailable",
                "Login is temporarily unavailable",
            );
        }
    };

    match services.codec.issue(&identity) {
        Ok(token) => {
            tracing::info!(user_id = %identity.user_id, "token issued");
            (
                StatusCode::OK,
                Json(dto::LoginResponse {
                    token,
                    token_type: "Bearer",
                    expires_in: services.codec.lifetime().num_seconds(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_issuance_failed",
                "Login failed. Please try again.",
            )
        }
    }
}
