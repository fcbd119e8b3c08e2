use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use leafy_auth::Actor;
use leafy_core::Username;

use crate::context::ActorContext;
use crate::jwt::JwtCodec;

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<JwtCodec>,
}

/// Resolve the request's actor from an optional bearer token.
///
/// Missing and invalid tokens both resolve to `Actor::Guest`: the order and
/// catalog paths tolerate guests, and strict handlers reject guests
/// themselves. An invalid token therefore downgrades instead of hard-failing,
/// matching the original order endpoint's behavior.
pub async fn attach_actor(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let actor = match extract_bearer(req.headers()) {
        Some(token) => match state.codec.verify(token, Utc::now()) {
            Some(claims) => match Username::new(claims.sub) {
                Ok(username) => Actor::user(username, claims.role),
                Err(_) => Actor::Guest,
            },
            None => {
                tracing::debug!("invalid bearer token, proceeding as guest");
                Actor::Guest
            }
        },
        None => Actor::Guest,
    };

    req.extensions_mut().insert(ActorContext::new(actor));
    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
