//! Spreadsheet webhook egress
//!
//! Every accepted order is mirrored to an external spreadsheet service as a
//! JSON POST. Delivery is best effort: the caller logs failures and moves on.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::WebhookConfig;
use crate::error::ForwardError;
use crate::models::Order;

/// Where accepted orders are mirrored to
#[async_trait]
pub trait OrderForwarder: Send + Sync {
    async fn forward(&self, order: &Order) -> Result<(), ForwardError>;
}

/// POSTs the order JSON to a fixed URL
pub struct HttpForwarder {
    client: reqwest::Client,
    url: String,
}

impl HttpForwarder {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ForwardError> {
        let url = url.into();
        info!("Initializing webhook forwarder to {}", url);

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl OrderForwarder for HttpForwarder {
    async fn forward(&self, order: &Order) -> Result<(), ForwardError> {
        let response = self.client.post(&self.url).json(order).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForwardError::Status {
                status: status.as_u16(),
                body,
            });
        }
        debug!(
            "[WEBHOOK] Order {}/{} forwarded ({})",
            order.passenger_id, order.flight_number, status
        );
        Ok(())
    }
}

/// Used when the webhook is disabled
pub struct NoopForwarder;

#[async_trait]
impl OrderForwarder for NoopForwarder {
    async fn forward(&self, order: &Order) -> Result<(), ForwardError> {
        debug!(
            "[WEBHOOK] disabled, not forwarding {}/{}",
            order.passenger_id, order.flight_number
        );
        Ok(())
    }
}

/// Build the forwarder the config asks for.
///
/// Enabled without a URL is an error, not a silent no-op.
pub fn from_config(config: &WebhookConfig) -> Result<Box<dyn OrderForwarder>, ForwardError> {
    if config.enabled {
        let url = config.url.trim();
        if url.is_empty() {
            return Err(ForwardError::MissingUrl);
        }
        Ok(Box::new(HttpForwarder::new(
            url,
            Duration::from_millis(config.timeout_ms),
        )?))
    } else {
        info!("Webhook forwarding disabled");
        Ok(Box::new(NoopForwarder))
    }
}
