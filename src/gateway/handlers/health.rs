//! Health check handler

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiResponse, error_codes};
use super::helpers::{BUILD_VERSION, now_ms};

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    /// Crate version and git hash
    #[schema(example = "0.1.0+1a2b3c4")]
    pub version: String,
    /// Flights in the reference table
    pub flights_loaded: usize,
    /// Orders in the record
    pub orders_stored: usize,
}

/// Health check endpoint
///
/// - Healthy: 200 OK + {code: 0, data: {...}}
/// - Order store unusable: 503 Service Unavailable + {code: 5000, msg: "unavailable"}
///
/// An empty reference table is reported but is not unhealthy; submissions
/// are simply rejected until the file is fixed.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let service = &state.order_service;
    let flights_loaded = service.flights().read().await.len();

    match service.store().len() {
        Ok(orders_stored) => (
            StatusCode::OK,
            Json(ApiResponse::success(HealthResponse {
                timestamp_ms: now_ms(),
                version: BUILD_VERSION.to_string(),
                flights_loaded,
                orders_stored,
            })),
        ),
        Err(e) => {
            tracing::error!("[HEALTH] Order store unavailable: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error(error_codes::INTERNAL_ERROR, "unavailable")),
            )
        }
    }
}
