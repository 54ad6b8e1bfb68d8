//! In-memory store backend for the local deployment profile and tests.
//!
//! All four stores share one dataset behind a single lock, which makes the
//! verification `confirm` trivially atomic and lets account deletion cascade
//! the same way the relational schema does.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::modules::account::interface::AccountStore;
use crate::modules::account::model::Account;
use crate::modules::image::interface::ImageStore;
use crate::modules::image::model::ProductImage;
use crate::modules::product::interface::ProductStore;
use crate::modules::product::model::Product;
use crate::modules::verification::interface::{
    Result as VerificationResult, VerificationError, VerificationStore,
};
use crate::modules::verification::model::EmailVerification;

#[derive(Default)]
struct MemoryData {
    accounts: HashMap<String, Account>,
    products: HashMap<String, Product>,
    images: HashMap<String, ProductImage>,
    verifications: HashMap<String, EmailVerification>,
}

#[derive(Default)]
pub struct MemoryBackend {
    data: RwLock<MemoryData>,
}

impl MemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

// =============================================================================
// ACCOUNTS
// =============================================================================

pub struct MemoryAccountStore {
    backend: Arc<MemoryBackend>,
}

impl MemoryAccountStore {
    pub fn new(backend: Arc<MemoryBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, account: &Account) -> Result<(), sqlx::Error> {
        let mut data = self.backend.data.write().await;
        data.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, sqlx::Error> {
        let data = self.backend.data.read().await;
        Ok(data.accounts.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error> {
        let data = self.backend.data.read().await;
        Ok(data.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let data = self.backend.data.read().await;
        Ok(data.accounts.values().any(|a| a.email == email))
    }

    async fn update(&self, account: &Account) -> Result<(), sqlx::Error> {
        let mut data = self.backend.data.write().await;
        data.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn delete_by_email(&self, email: &str) -> Result<(), sqlx::Error> {
        let mut data = self.backend.data.write().await;

        let Some(account_id) = data
            .accounts
            .values()
            .find(|a| a.email == email)
            .map(|a| a.id.clone())
        else {
            return Ok(());
        };

        data.accounts.remove(&account_id);

        // cascade: products, then their images
        let product_ids: Vec<String> = data
            .products
            .values()
            .filter(|p| p.owner_id == account_id)
            .map(|p| p.id.clone())
            .collect();

        data.products.retain(|_, p| p.owner_id != account_id);
        data.images
            .retain(|_, i| !product_ids.contains(&i.product_id));

        Ok(())
    }
}

// =============================================================================
// PRODUCTS
// =============================================================================

pub struct MemoryProductStore {
    backend: Arc<MemoryBackend>,
}

impl MemoryProductStore {
    pub fn new(backend: Arc<MemoryBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, product: &Product) -> Result<(), sqlx::Error> {
        let mut data = self.backend.data.write().await;
        data.products.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, sqlx::Error> {
        let data = self.backend.data.read().await;
        Ok(data.products.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, sqlx::Error> {
        let data = self.backend.data.read().await;
        let mut products: Vec<Product> = data.products.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Product>, sqlx::Error> {
        let data = self.backend.data.read().await;
        let mut products: Vec<Product> = data
            .products
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn sku_exists(&self, sku: &str) -> Result<bool, sqlx::Error> {
        let data = self.backend.data.read().await;
        Ok(data.products.values().any(|p| p.sku == sku))
    }

    async fn update(&self, product: &Product) -> Result<(), sqlx::Error> {
        let mut data = self.backend.data.write().await;
        data.products.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        let mut data = self.backend.data.write().await;
        data.products.remove(id);
        data.images.retain(|_, i| i.product_id != id);
        Ok(())
    }
}

// =============================================================================
// IMAGES
// =============================================================================

pub struct MemoryImageStore {
    backend: Arc<MemoryBackend>,
}

impl MemoryImageStore {
    pub fn new(backend: Arc<MemoryBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn create(&self, image: &ProductImage) -> Result<(), sqlx::Error> {
        let mut data = self.backend.data.write().await;
        data.images.insert(image.id.clone(), image.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ProductImage>, sqlx::Error> {
        let data = self.backend.data.read().await;
        Ok(data.images.get(id).cloned())
    }

    async fn list_by_product(&self, product_id: &str) -> Result<Vec<ProductImage>, sqlx::Error> {
        let data = self.backend.data.read().await;
        let mut images: Vec<ProductImage> = data
            .images
            .values()
            .filter(|i| i.product_id == product_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images)
    }

    async fn storage_key_exists(&self, key: &str) -> Result<bool, sqlx::Error> {
        let data = self.backend.data.read().await;
        Ok(data.images.values().any(|i| i.storage_key == key))
    }

    async fn delete(&self, id: &str) -> Result<(), sqlx::Error> {
        let mut data = self.backend.data.write().await;
        data.images.remove(id);
        Ok(())
    }
}

// =============================================================================
// VERIFICATIONS
// =============================================================================

pub struct MemoryVerificationStore {
    backend: Arc<MemoryBackend>,
}

impl MemoryVerificationStore {
    pub fn new(backend: Arc<MemoryBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    async fn save(&self, record: &EmailVerification) -> VerificationResult<()> {
        let mut data = self.backend.data.write().await;
        data.verifications.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> VerificationResult<Option<EmailVerification>> {
        let data = self.backend.data.read().await;
        Ok(data.verifications.get(id).cloned())
    }

    async fn find_by_email_and_token(
        &self,
        email: &str,
        token: &str,
    ) -> VerificationResult<Option<EmailVerification>> {
        let data = self.backend.data.read().await;
        Ok(data
            .verifications
            .values()
            .find(|v| v.email == email && v.token == token)
            .cloned())
    }

    async fn find_latest_by_email(&self, email: &str) -> VerificationResult<Option<EmailVerification>> {
        let data = self.backend.data.read().await;
        Ok(data
            .verifications
            .values()
            .filter(|v| v.email == email)
            .max_by_key(|v| v.created_at)
            .cloned())
    }

    async fn exists_live_for_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> VerificationResult<bool> {
        let data = self.backend.data.read().await;
        Ok(data
            .verifications
            .values()
            .any(|v| v.email == email && v.is_live_at(now)))
    }

    async fn confirm(&self, record_id: &str, email: &str) -> VerificationResult<()> {
        // One write lock over the whole dataset: the record flip and the
        // account flip land together or not at all.
        let mut data = self.backend.data.write().await;

        let Some(account_id) = data
            .accounts
            .values()
            .find(|a| a.email == email)
            .map(|a| a.id.clone())
        else {
            return Err(VerificationError::MissingAccount(email.to_string()));
        };

        if let Some(record) = data.verifications.get_mut(record_id) {
            record.verified = true;
        }
        if let Some(account) = data.accounts.get_mut(&account_id) {
            account.verified = true;
            account.updated_at = Utc::now();
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> VerificationResult<()> {
        let mut data = self.backend.data.write().await;
        data.verifications.remove(id);
        Ok(())
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> VerificationResult<u64> {
        let mut data = self.backend.data.write().await;
        let before = data.verifications.len();
        data.verifications.retain(|_, v| v.expires_at >= cutoff);
        Ok((before - data.verifications.len()) as u64)
    }
}
