use serde::{Deserialize, Serialize};

use studentapp_auth::{Identity, Principal};

// -------------------------
// Request DTOs
// -------------------------
//
// No `Debug` on requests carrying passwords.

#[derive(Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub username: String,
    pub authorities: Vec<String>,
}

pub fn signup_response(identity: &Identity) -> SignupResponse {
    SignupResponse {
        id: identity.user_id.to_string(),
        username: identity.username.clone(),
    }
}

pub fn me_response(principal: &Principal) -> MeResponse {
    MeResponse {
        user_id: principal.user_id().to_string(),
        username: principal.username().to_string(),
        authorities: principal
            .authorities
            .iter()
            .map(|a| a.as_str().to_string())
            .collect(),
    }
}
