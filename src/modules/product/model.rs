use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A product has exactly one owner for its entire lifetime; `owner_id` is set
/// at creation and never reassigned.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub manufacturer: String,
    pub quantity: i32,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
