//! Webhook delivery of a rendered chat payload.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::ChatPayload;

/// What the receiving end answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub body: String,
}

impl DeliveryReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx answer into `DeliveryRejected`.
    pub fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AppError::DeliveryRejected {
                status: self.status,
                body: self.body,
            })
        }
    }
}

#[async_trait]
pub trait Deliver: Send + Sync {
    async fn deliver(&self, payload: &ChatPayload) -> Result<DeliveryReceipt>;
}

/// Slack incoming webhook. The HTTP client is injected so callers control
/// timeouts and connection reuse.
pub struct SlackWebhook {
    url: String,
    http_client: Client,
}

impl SlackWebhook {
    pub fn new(url: String, http_client: Client) -> Self {
        Self { url, http_client }
    }
}

#[async_trait]
impl Deliver for SlackWebhook {
    async fn deliver(&self, payload: &ChatPayload) -> Result<DeliveryReceipt> {
        tracing::debug!("Posting {} attachment(s) to webhook", payload.attachments.len());

        let response = self.http_client.post(&self.url).json(payload).send().await?;
        let receipt = DeliveryReceipt {
            status: response.status().as_u16(),
            body: response.text().await?,
        };

        if !receipt.is_success() {
            tracing::warn!("Webhook answered {}: {}", receipt.status, receipt.body);
        }
        Ok(receipt)
    }
}
