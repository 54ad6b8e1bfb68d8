pub mod client;

use async_trait::async_trait;

pub use client::{HttpObjectStore, NoopObjectStore};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object storage request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("object storage returned status {status} for {op}")]
    Unexpected { op: &'static str, status: u16 },
}

/// External object storage collaborator. The core never inspects file bytes;
/// it forwards them here and persists only the resulting key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;
}
