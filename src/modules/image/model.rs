use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// An uploaded product image. The core never holds the bytes; `storage_key`
/// is the unique handle into the object storage collaborator.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductImage {
    pub id: String,
    pub product_id: String,
    pub file_name: String,
    pub storage_key: String,
    pub created_at: DateTime<Utc>,
}
