use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::app::dto;
use crate::context::CurrentUser;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn actuator_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "UP" }))
}

pub async fn whoami(CurrentUser(principal): CurrentUser) -> impl IntoResponse {
    Json(dto::me_response(&principal))
}
