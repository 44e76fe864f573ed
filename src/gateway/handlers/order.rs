//! JSON order submission handler

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::models::SubmissionOutcome;

use super::super::state::AppState;
use super::super::types::{
    ApiResponse, OrderRequest, SubmissionData, SubmissionStatus, error_codes, rejection_code,
};

/// Submit a special meal order
///
/// POST /api/v1/orders
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body(content = OrderRequest, description = "Meal order", content_type = "application/json"),
    responses(
        (status = 201, description = "Order recorded", body = SubmissionData, content_type = "application/json"),
        (status = 200, description = "Order already on file; data carries the original meal code", body = SubmissionData, content_type = "application/json"),
        (status = 422, description = "Rejected by a business rule"),
        (status = 500, description = "Order could not be recorded")
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OrderRequest>,
) -> (StatusCode, Json<ApiResponse<SubmissionData>>) {
    let normalized = req.clone().normalized();

    match state.order_service.submit(req).await {
        Ok(SubmissionOutcome::Accepted(order)) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(SubmissionData {
                status: SubmissionStatus::Accepted,
                passenger_id: order.passenger_id,
                flight_number: order.flight_number,
                meal_code: order.meal_code,
            })),
        ),
        Ok(SubmissionOutcome::Duplicate { existing_meal_code }) => (
            StatusCode::OK,
            Json(ApiResponse::success_with_msg(
                SubmissionData {
                    status: SubmissionStatus::Duplicate,
                    passenger_id: normalized.passenger_id,
                    flight_number: normalized.flight_number,
                    meal_code: existing_meal_code,
                },
                "order already on file",
            )),
        ),
        Ok(SubmissionOutcome::Rejected(rejection)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::error(
                rejection_code(&rejection),
                rejection.message(),
            )),
        ),
        Err(e) => {
            tracing::error!(
                "[SPML] Failed to record order for passenger={} flight={}: {}",
                normalized.passenger_id,
                normalized.flight_number,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    error_codes::INTERNAL_ERROR,
                    "order could not be recorded",
                )),
            )
        }
    }
}
