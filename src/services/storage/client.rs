use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::services::metrics::{MetricsRegistry, StorageMetricsCollector};
use crate::services::storage::{ObjectStore, StorageError};

/// Object store backed by an S3-compatible HTTP gateway. Objects live under
/// `{endpoint}/{bucket}/{key}`.
pub struct HttpObjectStore {
    client: Client,
    endpoint: String,
    bucket: String,
    collector: StorageMetricsCollector,
}

impl HttpObjectStore {
    pub fn new(endpoint: String, bucket: String, metrics: Arc<MetricsRegistry>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket,
            collector: StorageMetricsCollector::new(metrics),
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        let response = self
            .client
            .put(self.object_url(key))
            .header("Content-Type", content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| {
                self.collector.record("put", "error");
                StorageError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            self.collector.record("put", "error");
            return Err(StorageError::Unexpected {
                op: "put",
                status: status.as_u16(),
            });
        }

        self.collector.record("put", "success");
        tracing::info!("object stored: bucket={}, key={}", self.bucket, key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(self.object_url(key))
            .send()
            .await
            .map_err(|e| {
                self.collector.record("delete", "error");
                StorageError::Transport(e)
            })?;

        let status = response.status();
        // Deleting an already-missing object is not an error.
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            self.collector.record("delete", "error");
            return Err(StorageError::Unexpected {
                op: "delete",
                status: status.as_u16(),
            });
        }

        self.collector.record("delete", "success");
        tracing::info!("object deleted: bucket={}, key={}", self.bucket, key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let response = self
            .client
            .head(self.object_url(key))
            .send()
            .await
            .map_err(StorageError::Transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(StorageError::Unexpected {
                op: "head",
                status: status.as_u16(),
            }),
        }
    }
}

/// Stub object store for deployment profiles without object storage. Uploads
/// succeed without persisting bytes; existence checks report true so callers
/// can exercise the full flow locally.
pub struct NoopObjectStore;

#[async_trait]
impl ObjectStore for NoopObjectStore {
    async fn put(&self, key: &str, _bytes: &[u8], _content_type: &str) -> Result<(), StorageError> {
        tracing::warn!("object storage not configured, skipping upload of {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        tracing::warn!("object storage not configured, skipping delete of {}", key);
        Ok(())
    }

    async fn exists(&self, _key: &str) -> Result<bool, StorageError> {
        Ok(true)
    }
}
