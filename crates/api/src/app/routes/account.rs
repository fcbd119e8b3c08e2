use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use leafy_auth::{Actor, ensure_authenticated};
use leafy_store::Storefront;

use crate::app::{dto, errors};
use crate::context::ActorContext;
use crate::jwt::JwtCodec;

/// `POST /login`: verify credentials, mint a bearer token.
pub async fn login(
    Extension(storefront): Extension<Arc<Storefront>>,
    Extension(codec): Extension<Arc<JwtCodec>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let account = match storefront.login(&body.username, &body.password).await {
        Ok(account) => account,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match codec.issue(&account, Utc::now()) {
        Ok(token) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "role": account.role,
                "token": token,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `POST /register`: create a customer account.
pub async fn register(
    Extension(storefront): Extension<Arc<Storefront>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    match storefront.register(&body.username, &body.password).await {
        Ok(account) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "success": true,
                "user": {
                    "username": account.username,
                    "role": account.role,
                },
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `POST /logout`: tokens are stateless; this acknowledges so clients can
/// drop theirs. Requires a valid token.
pub async fn logout(Extension(actor): Extension<ActorContext>) -> axum::response::Response {
    if let Err(e) = ensure_authenticated(actor.actor()) {
        return errors::domain_error_to_response(e);
    }
    if let Some(username) = actor.actor().username() {
        tracing::info!(%username, "user logged out");
    }
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": "logged out",
        })),
    )
        .into_response()
}

/// `GET /user`: echo the authenticated identity.
pub async fn whoami(Extension(actor): Extension<ActorContext>) -> axum::response::Response {
    match actor.actor() {
        Actor::Guest => errors::domain_error_to_response(leafy_core::DomainError::Unauthenticated),
        Actor::User { username, role } => (
            StatusCode::OK,
            Json(serde_json::json!({
                "username": username,
                "role": role,
            })),
        )
            .into_response(),
    }
}
