use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use orderdesk_core::OrderId;
use orderdesk_infra::OrderStore;
use orderdesk_sales::OrderRequest;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order))
        .route("/:id", get(get_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateOrderRequest>, JsonRejection>,
) -> axum::response::Response {
    // Keep axum's status (400/415/422) but answer in the JSON error shape.
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_error(rejection.status(), "invalid_body", rejection.body_text()),
    };

    let request = match OrderRequest::try_from(body) {
        Ok(r) => r,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.workflow.execute(request).await {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::workflow_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.orders.find_by_id(&id).await {
        Ok(Some(order)) => Json(order).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "order_not_found", format!("order {id} not found")),
        Err(e) => errors::json_error(StatusCode::INTERNAL_SERVER_ERROR, "repository_error", e.to_string()),
    }
}
