use std::sync::Arc;

use chrono::Utc;

use crate::modules::account::AccountStore;
use crate::modules::product::interface::ProductStore;
use crate::modules::product::model::Product;
use crate::services::authz;
use crate::services::storage::ObjectStore;
use crate::services::token;

use super::interface::{ImageError, ImageStore, Result};
use super::model::ProductImage;

/// Image lifecycle orchestration. Mutations authorize against the parent
/// product's ultimate owner; the bytes go straight to object storage and only
/// the returned key is persisted.
pub struct ImageService {
    images: Arc<dyn ImageStore>,
    products: Arc<dyn ProductStore>,
    accounts: Arc<dyn AccountStore>,
    objects: Arc<dyn ObjectStore>,
}

impl ImageService {
    pub fn new(
        images: Arc<dyn ImageStore>,
        products: Arc<dyn ProductStore>,
        accounts: Arc<dyn AccountStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            images,
            products,
            accounts,
            objects,
        }
    }

    async fn load_product(&self, product_id: &str) -> Result<Product> {
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or(ImageError::ProductNotFound)
    }

    async fn owner_email(&self, product: &Product) -> Result<String> {
        let owner = self
            .accounts
            .find_by_id(&product.owner_id)
            .await?
            .ok_or_else(|| ImageError::OwnerMissing(product.id.clone()))?;

        Ok(owner.email)
    }

    pub async fn upload(
        &self,
        product_id: &str,
        principal_email: &str,
        file_name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<ProductImage> {
        if file_name.trim().is_empty() {
            return Err(ImageError::Validation("file name is required".to_string()));
        }

        let product = self.load_product(product_id).await?;
        let owner_email = self.owner_email(&product).await?;
        authz::authorize(principal_email, &owner_email)?;

        let now = Utc::now();
        let storage_key = format!(
            "{}/{}/{}-{}",
            product.owner_id,
            product.id,
            now.timestamp_millis(),
            file_name
        );

        if self.images.storage_key_exists(&storage_key).await? {
            return Err(ImageError::DuplicateKey);
        }

        // Object first, row second: an orphaned object is recoverable, a row
        // pointing at nothing is not.
        self.objects.put(&storage_key, bytes, content_type).await?;

        let image = ProductImage {
            id: token::new_id(),
            product_id: product.id.clone(),
            file_name: file_name.to_string(),
            storage_key,
            created_at: now,
        };

        self.images.create(&image).await?;
        tracing::info!("image uploaded for product {}: {}", product.id, image.storage_key);

        Ok(image)
    }

    pub async fn get(&self, product_id: &str, image_id: &str) -> Result<ProductImage> {
        // ensure the parent exists before resolving the image
        self.load_product(product_id).await?;

        let image = self
            .images
            .find_by_id(image_id)
            .await?
            .ok_or(ImageError::NotFound)?;

        if image.product_id != product_id {
            return Err(ImageError::NotFound);
        }

        Ok(image)
    }

    pub async fn list(&self, product_id: &str) -> Result<Vec<ProductImage>> {
        self.load_product(product_id).await?;

        Ok(self.images.list_by_product(product_id).await?)
    }

    pub async fn delete(
        &self,
        product_id: &str,
        image_id: &str,
        principal_email: &str,
    ) -> Result<()> {
        let product = self.load_product(product_id).await?;

        let image = self
            .images
            .find_by_id(image_id)
            .await?
            .ok_or(ImageError::NotFound)?;

        if image.product_id != product_id {
            return Err(ImageError::NotFound);
        }

        let owner_email = self.owner_email(&product).await?;
        authz::authorize(principal_email, &owner_email)?;

        self.objects.delete(&image.storage_key).await?;
        self.images.delete(&image.id).await?;
        tracing::info!("image deleted for product {}: {}", product_id, image.storage_key);

        Ok(())
    }
}
