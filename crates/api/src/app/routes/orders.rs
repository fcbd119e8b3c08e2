use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use leafy_core::OrderId;
use leafy_orders::{OrderLookup, OrderRequest, OrderStatus};
use leafy_store::Storefront;

use crate::app::{dto, errors};
use crate::context::ActorContext;

/// `GET /orders`: scoped listing. Admins see all, customers their own,
/// guests only exact phone/order-id lookups.
pub async fn list(
    Extension(storefront): Extension<Arc<Storefront>>,
    Extension(actor): Extension<ActorContext>,
    Query(query): Query<dto::OrdersQuery>,
) -> axum::response::Response {
    let order_id = match query.order_id.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<OrderId>() {
            Ok(id) => Some(id),
            Err(_) => {
                return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id");
            }
        },
    };

    let lookup = OrderLookup {
        phone: query.phone,
        order_id,
    };

    match storefront.orders(actor.actor(), lookup).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `POST /order`: checkout. Guest-tolerant: an invalid or missing token
/// places the order under the guest marker.
pub async fn submit(
    Extension(storefront): Extension<Arc<Storefront>>,
    Extension(actor): Extension<ActorContext>,
    Json(body): Json<OrderRequest>,
) -> axum::response::Response {
    match storefront.place_order(actor.actor(), body).await {
        Ok(order) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "orderId": order.id,
                "userType": if order.user.is_guest() { "guest" } else { "authenticated" },
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// `PUT /orders/:order_id`: admin status transition.
pub async fn update_status(
    Extension(storefront): Extension<Arc<Storefront>>,
    Extension(actor): Extension<ActorContext>,
    Path(order_id): Path<String>,
    Json(body): Json<dto::StatusUpdateRequest>,
) -> axum::response::Response {
    let order_id: OrderId = match order_id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"),
    };

    let status: OrderStatus = match body.status.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match storefront
        .update_order_status(actor.actor(), order_id, status)
        .await
    {
        Ok(order) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "order": order,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
