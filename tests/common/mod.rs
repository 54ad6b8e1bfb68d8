use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use product_service::modules::account::schema::AccountCreateRequest;
use product_service::modules::account::{AccountService, AccountStore};
use product_service::modules::image::{ImageService, ImageStore};
use product_service::modules::memory::{
    MemoryAccountStore, MemoryBackend, MemoryImageStore, MemoryProductStore,
    MemoryVerificationStore,
};
use product_service::modules::product::schema::ProductCreateRequest;
use product_service::modules::product::{ProductService, ProductStore};
use product_service::modules::verification::{VerificationService, VerificationStore};
use product_service::services::hashing::{Argon2Hasher, CredentialHasher};
use product_service::services::metrics::MetricsRegistry;
use product_service::services::notify::{NotificationDispatcher, PublishError, TopicPublisher};
use product_service::services::storage::{ObjectStore, StorageError};

#[allow(dead_code)]
pub const TTL_SECS: i64 = 180;

// =============================================================================
// COLLABORATOR DOUBLES
// =============================================================================

/// Publisher that records every publish so tests can inspect payloads.
#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl TopicPublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, message: &str) -> Result<String, PublishError> {
        self.published
            .lock()
            .await
            .push((topic.to_string(), message.to_string()));
        Ok("msg-test".to_string())
    }
}

/// Publisher simulating an unreachable notification endpoint.
pub struct FailingPublisher;

#[async_trait]
impl TopicPublisher for FailingPublisher {
    async fn publish(&self, _topic: &str, _message: &str) -> Result<String, PublishError> {
        Err(PublishError::Endpoint(503))
    }
}

/// Object store keeping bytes in a map so tests can observe puts and deletes.
#[derive(Default)]
pub struct MemoryObjectStore {
    pub objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
}

#[allow(dead_code)]
impl MemoryObjectStore {
    pub async fn contains(&self, key: &str) -> bool {
        self.objects.lock().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        self.objects
            .lock()
            .await
            .insert(key.to_string(), (bytes.to_vec(), content_type.to_string()));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.objects.lock().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.objects.lock().await.contains_key(key))
    }
}

// =============================================================================
// TEST CONTEXT
// =============================================================================

/// Fully wired service core over the in-memory backend. No database, no
/// network; every collaborator is a local double.
#[allow(dead_code)]
pub struct TestContext {
    pub accounts: AccountService,
    pub products: ProductService,
    pub images: ImageService,
    pub verification: Arc<VerificationService>,
    pub account_store: Arc<dyn AccountStore>,
    pub verification_store: Arc<dyn VerificationStore>,
    pub publisher: Arc<RecordingPublisher>,
    pub objects: Arc<MemoryObjectStore>,
    pub hasher: Arc<dyn CredentialHasher>,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let recording = Arc::new(RecordingPublisher::default());
        Self::with_publisher(recording.clone(), recording)
    }

    /// Context whose notification endpoint always fails. The recording
    /// publisher field is present but never receives anything.
    pub fn with_failing_publisher() -> Self {
        Self::with_publisher(Arc::new(FailingPublisher), Arc::new(RecordingPublisher::default()))
    }

    fn with_publisher(
        publisher: Arc<dyn TopicPublisher>,
        recording: Arc<RecordingPublisher>,
    ) -> Self {
        let backend = MemoryBackend::new();
        let metrics = MetricsRegistry::new().expect("metrics registry");

        let account_store: Arc<dyn AccountStore> =
            Arc::new(MemoryAccountStore::new(backend.clone()));
        let product_store: Arc<dyn ProductStore> =
            Arc::new(MemoryProductStore::new(backend.clone()));
        let image_store: Arc<dyn ImageStore> = Arc::new(MemoryImageStore::new(backend.clone()));
        let verification_store: Arc<dyn VerificationStore> =
            Arc::new(MemoryVerificationStore::new(backend));

        let verification = Arc::new(VerificationService::new(
            verification_store.clone(),
            TTL_SECS,
            metrics.clone(),
        ));

        let dispatcher = Arc::new(NotificationDispatcher::new(
            publisher,
            "email-verification".to_string(),
            metrics,
        ));

        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new());

        let objects = Arc::new(MemoryObjectStore::default());
        let objects_dyn: Arc<dyn ObjectStore> = objects.clone();

        let accounts = AccountService::new(
            account_store.clone(),
            hasher.clone(),
            verification.clone(),
            dispatcher,
        );

        let products = ProductService::new(
            product_store.clone(),
            account_store.clone(),
            image_store.clone(),
            objects_dyn.clone(),
        );

        let images = ImageService::new(image_store, product_store, account_store.clone(), objects_dyn);

        Self {
            accounts,
            products,
            images,
            verification,
            account_store,
            verification_store,
            publisher: recording,
            objects,
            hasher,
        }
    }

    /// Token of the most recent verification record for the email, straight
    /// from the store.
    pub async fn latest_token(&self, email: &str) -> String {
        self.verification_store
            .find_latest_by_email(email)
            .await
            .expect("store read")
            .expect("verification record present")
            .token
    }
}

// =============================================================================
// REQUEST HELPERS
// =============================================================================

#[allow(dead_code)]
pub fn test_email() -> String {
    format!("test_{}@example.com", uuid::Uuid::new_v4())
}

#[allow(dead_code)]
pub fn test_password() -> &'static str {
    "TestPassword123!"
}

#[allow(dead_code)]
pub fn account_request(email: &str) -> AccountCreateRequest {
    AccountCreateRequest {
        email: email.to_string(),
        password: test_password().to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
    }
}

#[allow(dead_code)]
pub fn product_request(sku: &str) -> ProductCreateRequest {
    ProductCreateRequest {
        sku: sku.to_string(),
        name: "Widget".to_string(),
        description: Some("A very good widget".to_string()),
        manufacturer: "Acme".to_string(),
        quantity: 10,
    }
}
