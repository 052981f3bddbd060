use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE, request::Parts},
    response::Response,
};

use studentapp_auth::{Principal, SecurityContext};

use crate::app::errors::json_error;

/// Principal of an authenticated request.
///
/// Taking this as a handler argument is what makes a route protected: a
/// request whose [`SecurityContext`] is empty (or missing) is answered with
/// `401` before the handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .and_then(SecurityContext::principal)
            .cloned()
            .map(CurrentUser)
            .ok_or_else(unauthorized)
    }
}

fn unauthorized() -> Response {
    let mut res = json_error(
        StatusCode::UNAUTHORIZED,
        "unauthorized",
        "authentication required",
    );
    res.headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    res
}
