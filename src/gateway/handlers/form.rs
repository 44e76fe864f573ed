//! HTML form handlers (order form, confirmation page)

use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::Html,
};

use super::super::state::AppState;
use super::super::types::OrderRequest;
use super::super::views::ConfirmationView;

/// GET /
pub async fn order_form(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    let body = state.views.render_form().map_err(|e| {
        tracing::error!("[VIEW] Failed to render order form: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Template error")
    })?;
    Ok(Html(body))
}

/// POST /submit-order
///
/// Every business outcome (accepted, duplicate, rejected) is a 200 with the
/// confirmation page. Only a failure to record the order is a 500.
pub async fn submit_order(
    State(state): State<Arc<AppState>>,
    Form(req): Form<OrderRequest>,
) -> Result<(StatusCode, Html<String>), (StatusCode, &'static str)> {
    let normalized = req.clone().normalized();

    let (status, view) = match state.order_service.submit(req).await {
        Ok(outcome) => (
            StatusCode::OK,
            ConfirmationView::from_outcome(&normalized, &outcome),
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
                ConfirmationView::internal_error(&normalized),
            )
        }
    };

    let body = state.views.render_confirmation(&view).map_err(|e| {
        tracing::error!("[VIEW] Failed to render confirmation: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Template error")
    })?;
    Ok((status, Html(body)))
}
