use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("notification endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notification endpoint rejected publish with status {0}")]
    Endpoint(u16),
}

/// External notification endpoint. Publishes an opaque message to a topic and
/// returns the endpoint's message id.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    async fn publish(&self, topic: &str, message: &str) -> Result<String, PublishError>;
}

/// HTTP topic publisher
/// POSTs the message body to `{endpoint}/{topic}` and reads the message id
/// from the response.
pub struct HttpTopicPublisher {
    client: Client,
    endpoint: String,
}

impl HttpTopicPublisher {
    pub fn new(endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TopicPublisher for HttpTopicPublisher {
    async fn publish(&self, topic: &str, message: &str) -> Result<String, PublishError> {
        let url = format!("{}/{}", self.endpoint, topic);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(message.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::Endpoint(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message_id = body
            .get("message_id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(message_id)
    }
}

/// Stub publisher for deployment profiles without a notification endpoint.
/// Reports success so callers never treat a missing collaborator as a
/// delivery failure.
pub struct NoopPublisher;

#[async_trait]
impl TopicPublisher for NoopPublisher {
    async fn publish(&self, topic: &str, _message: &str) -> Result<String, PublishError> {
        tracing::warn!("notification endpoint not configured, skipping publish to {}", topic);
        Ok(String::new())
    }
}
