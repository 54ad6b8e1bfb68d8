use async_trait::async_trait;

use crate::services::authz::Forbidden;
use crate::services::storage::StorageError;

use super::model::Product;

pub type Result<T> = std::result::Result<T, ProductError>;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, product: &Product) -> std::result::Result<(), sqlx::Error>;
    async fn find_by_id(&self, id: &str) -> std::result::Result<Option<Product>, sqlx::Error>;
    async fn list(&self) -> std::result::Result<Vec<Product>, sqlx::Error>;
    async fn list_by_owner(&self, owner_id: &str) -> std::result::Result<Vec<Product>, sqlx::Error>;
    async fn sku_exists(&self, sku: &str) -> std::result::Result<bool, sqlx::Error>;
    async fn update(&self, product: &Product) -> std::result::Result<(), sqlx::Error>;
    async fn delete(&self, id: &str) -> std::result::Result<(), sqlx::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product not found")]
    NotFound,

    #[error("account not found")]
    AccountNotFound,

    #[error(transparent)]
    Forbidden(#[from] Forbidden),

    #[error("SKU already exists")]
    SkuTaken,

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
