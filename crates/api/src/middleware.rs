use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use studentapp_auth::{Authenticator, SecurityContext};

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Authenticator,
}

/// Populate the request's [`SecurityContext`] from its bearer token.
///
/// Always forwards: an unauthenticated request reaches routing with an empty
/// context and route extractors decide whether that is acceptable. A context
/// left by an earlier pass is reused, so stacking this layer twice is harmless.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let mut ctx = req
        .extensions_mut()
        .remove::<SecurityContext>()
        .unwrap_or_default();

    let authorization = req.headers().get(AUTHORIZATION).map(|v| v.as_bytes());
    state.authenticator.authenticate(authorization, &mut ctx).await;

    req.extensions_mut().insert(ctx);
    next.run(req).await
}
