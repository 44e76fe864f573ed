//! Gateway HTTP handlers
//!
//! - [`form`]: HTML order form and confirmation page
//! - [`order`]: JSON order API
//! - [`health`]: health check

pub mod form;
pub mod health;
pub mod helpers;
pub mod order;

pub use form::{order_form, submit_order};
pub use health::{HealthResponse, health_check};
pub use order::create_order;
