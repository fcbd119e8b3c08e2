use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use leafy_store::Storefront;

/// `GET /health`: fast liveness probe, no store round trip.
pub async fn health() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": Utc::now(),
        })),
    )
        .into_response()
}

/// `GET /status`: liveness plus a store connectivity check.
pub async fn status(Extension(storefront): Extension<Arc<Storefront>>) -> axum::response::Response {
    let store_ok = storefront.batches().await.is_ok();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": if store_ok { "healthy" } else { "degraded" },
            "store": if store_ok { "connected" } else { "disconnected" },
            "timestamp": Utc::now(),
        })),
    )
        .into_response()
}
