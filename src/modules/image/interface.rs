use async_trait::async_trait;

use crate::services::authz::Forbidden;
use crate::services::storage::StorageError;

use super::model::ProductImage;

pub type Result<T> = std::result::Result<T, ImageError>;

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn create(&self, image: &ProductImage) -> std::result::Result<(), sqlx::Error>;
    async fn find_by_id(&self, id: &str) -> std::result::Result<Option<ProductImage>, sqlx::Error>;
    async fn list_by_product(
        &self,
        product_id: &str,
    ) -> std::result::Result<Vec<ProductImage>, sqlx::Error>;
    async fn storage_key_exists(&self, key: &str) -> std::result::Result<bool, sqlx::Error>;
    async fn delete(&self, id: &str) -> std::result::Result<(), sqlx::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error(transparent)]
    Forbidden(#[from] Forbidden),

    #[error("storage key already exists")]
    DuplicateKey,

    #[error("validation failed: {0}")]
    Validation(String),

    /// Data-integrity fault: a product should never outlive its owner.
    #[error("product references missing owner account: {0}")]
    OwnerMissing(String),

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    ObjectStorage(#[from] StorageError),
}
