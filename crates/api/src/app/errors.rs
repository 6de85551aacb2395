use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use orderdesk_core::DomainError;
use orderdesk_infra::WorkflowError;
use orderdesk_sales::OrderError;

pub fn workflow_error_to_response(err: WorkflowError) -> axum::response::Response {
    let status = match &err {
        WorkflowError::Order(e) => order_error_status(e),
        WorkflowError::Repository(_) | WorkflowError::CompensationFailed { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_error(status, err.code(), err.to_string())
}

fn order_error_status(err: &OrderError) -> StatusCode {
    match err {
        OrderError::CustomerNotFound(_)
        | OrderError::NoProductsFound
        | OrderError::ProductNotFound(_) => StatusCode::NOT_FOUND,
        OrderError::InsufficientStock { .. } | OrderError::InvalidQuantity(_) => StatusCode::BAD_REQUEST,
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let code = match err {
        DomainError::InvalidId(_) => "invalid_id",
        DomainError::Validation(_) => "validation_error",
    };
    json_error(StatusCode::BAD_REQUEST, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
