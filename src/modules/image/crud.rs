use async_trait::async_trait;

use crate::config::DbPool;

use super::interface::ImageStore;
use super::model::ProductImage;

/// MySQL-backed product image store.
pub struct MySqlImageStore {
    pool: DbPool,
}

impl MySqlImageStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageStore for MySqlImageStore {
    async fn create(&self, image: &ProductImage) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO product_images (id, product_id, file_name, storage_key, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&image.id)
        .bind(&image.product_id)
        .bind(&image.file_name)
        .bind(&image.storage_key)
        .bind(image.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ProductImage>, sqlx::Error> {
        sqlx::query_as::<_, ProductImage>("SELECT * FROM product_images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_by_product(&self, product_id: &str) -> Result<Vec<ProductImage>, sqlx::Error> {
        sqlx::query_as::<_, ProductImage>(
            "SELECT * FROM product_images WHERE product_id = ? ORDER BY created_at DESC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn storage_key_exists(&self, key: &str) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product_images WHERE storage_key = ?")
            .bind(key)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }

    async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM product_images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
