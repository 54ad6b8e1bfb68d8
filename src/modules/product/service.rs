use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::modules::account::AccountStore;
use crate::modules::image::interface::ImageStore;
use crate::services::authz;
use crate::services::storage::ObjectStore;
use crate::services::token;

use super::interface::{ProductError, ProductStore, Result};
use super::model::Product;
use super::schema::{ProductCreateRequest, ProductUpdateRequest};

/// Product lifecycle orchestration. Reads are public; every mutation resolves
/// the owning account's email and goes through the ownership guard.
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    accounts: Arc<dyn AccountStore>,
    images: Arc<dyn ImageStore>,
    objects: Arc<dyn ObjectStore>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductStore>,
        accounts: Arc<dyn AccountStore>,
        images: Arc<dyn ImageStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            products,
            accounts,
            images,
            objects,
        }
    }

    /// Resolves a product's ultimate owner email. A dangling owner reference
    /// is a data-integrity fault, not a NotFound.
    async fn owner_email(&self, product: &Product) -> Result<String> {
        let owner = self
            .accounts
            .find_by_id(&product.owner_id)
            .await?
            .ok_or_else(|| ProductError::OwnerMissing(product.id.clone()))?;

        Ok(owner.email)
    }

    pub async fn create(&self, req: ProductCreateRequest, principal_email: &str) -> Result<Product> {
        req.validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if self.products.sku_exists(&req.sku).await? {
            return Err(ProductError::SkuTaken);
        }

        let owner = self
            .accounts
            .find_by_email(principal_email)
            .await?
            .ok_or(ProductError::AccountNotFound)?;

        let now = Utc::now();
        let product = Product {
            id: token::new_id(),
            sku: req.sku,
            name: req.name,
            description: req.description,
            manufacturer: req.manufacturer,
            quantity: req.quantity,
            owner_id: owner.id,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.products.create(&product).await {
            // unique SKU constraint is the backstop for concurrent creates
            if e.to_string().contains("1062") {
                return Err(ProductError::SkuTaken);
            }
            return Err(e.into());
        }
        tracing::info!("product created with sku {}", product.sku);

        Ok(product)
    }

    pub async fn get(&self, id: &str) -> Result<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.products.list().await?)
    }

    /// Owner-scoped listing, pre-filtered by the authenticated identity.
    pub async fn list_mine(&self, principal_email: &str) -> Result<Vec<Product>> {
        let owner = self
            .accounts
            .find_by_email(principal_email)
            .await?
            .ok_or(ProductError::AccountNotFound)?;

        Ok(self.products.list_by_owner(&owner.id).await?)
    }

    pub async fn update(
        &self,
        id: &str,
        req: ProductUpdateRequest,
        principal_email: &str,
    ) -> Result<Product> {
        req.validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)?;

        let owner_email = self.owner_email(&product).await?;
        authz::authorize(principal_email, &owner_email)?;

        let mut updated = false;
        if let Some(name) = req.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                product.name = name.to_string();
                updated = true;
            }
        }
        if let Some(description) = req.description.as_deref() {
            if !description.trim().is_empty() {
                product.description = Some(description.to_string());
                updated = true;
            }
        }
        if let Some(manufacturer) = req.manufacturer.as_deref().map(str::trim) {
            if !manufacturer.is_empty() {
                product.manufacturer = manufacturer.to_string();
                updated = true;
            }
        }
        if let Some(quantity) = req.quantity {
            product.quantity = quantity;
            updated = true;
        }

        if !updated {
            return Err(ProductError::Validation(
                "no valid fields provided for update".to_string(),
            ));
        }

        product.updated_at = Utc::now();
        self.products.update(&product).await?;
        tracing::info!("product updated with id {}", product.id);

        Ok(product)
    }

    /// Deletes a product and cascades to its images: backing objects are
    /// removed through the object storage collaborator, then the rows.
    pub async fn delete(&self, id: &str, principal_email: &str) -> Result<()> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)?;

        let owner_email = self.owner_email(&product).await?;
        authz::authorize(principal_email, &owner_email)?;

        for image in self.images.list_by_product(&product.id).await? {
            self.objects.delete(&image.storage_key).await?;
            self.images.delete(&image.id).await?;
        }

        self.products.delete(&product.id).await?;
        tracing::info!("product deleted with id {}", product.id);

        Ok(())
    }
}
