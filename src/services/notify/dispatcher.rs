use std::sync::Arc;

use serde::Serialize;

use crate::services::metrics::{DispatchMetricsCollector, MetricsRegistry};
use crate::services::notify::publisher::{PublishError, TopicPublisher};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to encode notification payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Payload published for every issued verification token. Key casing matches
/// what the downstream email worker consumes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerificationMessage<'a> {
    email: &'a str,
    token: &'a str,
    first_name: &'a str,
}

/// Best-effort publication of verification events to the notification topic.
/// The token record is already durable before dispatch is attempted; a
/// failure here is reported to the caller but never rolls the record back.
pub struct NotificationDispatcher {
    publisher: Arc<dyn TopicPublisher>,
    topic: String,
    collector: DispatchMetricsCollector,
}

impl NotificationDispatcher {
    pub fn new(
        publisher: Arc<dyn TopicPublisher>,
        topic: String,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            publisher,
            topic,
            collector: DispatchMetricsCollector::new(metrics),
        }
    }

    pub async fn dispatch_verification(
        &self,
        email: &str,
        token: &str,
        first_name: &str,
    ) -> Result<String, DispatchError> {
        let message = serde_json::to_string(&VerificationMessage {
            email,
            token,
            first_name,
        })?;

        match self.publisher.publish(&self.topic, &message).await {
            Ok(message_id) => {
                self.collector.record_published();
                tracing::info!(
                    "verification notification published for {} (message id: {})",
                    email,
                    message_id
                );
                Ok(message_id)
            }
            Err(e) => {
                self.collector.record_failed();
                tracing::error!("failed to publish verification notification for {}: {}", email, e);
                Err(e.into())
            }
        }
    }
}
