use std::sync::Arc;

use super::services::OrderService;
use super::views::Views;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// Validation chain, order store and webhook
    pub order_service: Arc<OrderService>,
    /// Compiled HTML templates
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(order_service: Arc<OrderService>, views: Arc<Views>) -> Self {
        Self {
            order_service,
            views,
        }
    }
}
