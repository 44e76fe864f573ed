pub mod handlers;
pub mod openapi;
pub mod services;
pub mod state;
pub mod types;
pub mod views;

use axum::{
    Json, Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;

use state::AppState;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::ApiDoc::openapi())
}

/// Build the complete router
pub fn build_router(state: Arc<AppState>) -> Router {
    // ==========================================================================
    // HTML form
    // ==========================================================================
    let form_routes = Router::new()
        .route("/", get(handlers::order_form))
        .route("/submit-order", post(handlers::submit_order));

    // ==========================================================================
    // JSON API
    // ==========================================================================
    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/orders", post(handlers::create_order));

    Router::new()
        .merge(form_routes)
        .nest("/api/v1", api_routes)
        .with_state(state)
        .route("/api-docs/openapi.json", get(openapi_json))
}

/// Start HTTP Gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        tracing::error!("FATAL: Failed to bind to {}: {}", addr, e);
        tracing::error!(
            "Hint: Port {} may already be in use. Check with: lsof -i :{}",
            port,
            port
        );
        e
    })?;

    tracing::info!("SPML desk listening on http://{}", addr);
    tracing::info!("Order form:  http://{}/", addr);
    tracing::info!("JSON API:    http://{}/api/v1/orders", addr);
    tracing::info!("API Docs:    http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
