use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use leafy_catalog::{SortKey, StatusFilter, filter_and_sort};
use leafy_store::Storefront;

use crate::app::{dto, errors};

/// `GET /catalog`: the customer-facing view, visible/orderable entries with
/// search, status facet, and sort applied.
pub async fn list(
    Extension(storefront): Extension<Arc<Storefront>>,
    Query(query): Query<dto::CatalogQuery>,
) -> axum::response::Response {
    let status = match query.status.as_deref() {
        None => StatusFilter::All,
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(e) => return errors::domain_error_to_response(e),
        },
    };
    // Unknown sort keys mean "keep input order" rather than an error.
    let sort = query.sort.as_deref().and_then(SortKey::parse);

    let batches = match storefront.batches().await {
        Ok(batches) => batches,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let entries = filter_and_sort(
        &batches,
        query.search.as_deref().unwrap_or(""),
        status,
        sort,
        Utc::now().date_naive(),
        storefront.config().maturation_days,
    );

    (StatusCode::OK, Json(entries)).into_response()
}
