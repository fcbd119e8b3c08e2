use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use leafy_core::BatchId;
use leafy_inventory::Batch;
use leafy_store::Storefront;

use crate::app::{dto, errors};
use crate::context::ActorContext;

/// `GET /batches`: the raw batch list, public.
pub async fn list(Extension(storefront): Extension<Arc<Storefront>>) -> axum::response::Response {
    match storefront.batches().await {
        Ok(batches) => (StatusCode::OK, Json(batches)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `POST /batches`: admin bulk save; the body replaces the collection.
pub async fn replace(
    Extension(storefront): Extension<Arc<Storefront>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<Vec<dto::BatchDto>>,
) -> axum::response::Response {
    let default_name = storefront.config().default_batch_name.clone();

    let batches = match body
        .into_iter()
        .map(|dto| dto.into_batch(&default_name))
        .collect::<Result<Vec<Batch>, _>>()
    {
        Ok(batches) => batches,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match storefront.replace_batches(actor.actor(), batches).await {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "count": count,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `DELETE /batches/:id`: admin hard delete.
pub async fn remove(
    Extension(storefront): Extension<Arc<Storefront>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BatchId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid batch id"),
    };

    match storefront.delete_batch(actor.actor(), id).await {
        Ok(deleted) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "deletedBatch": deleted,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
