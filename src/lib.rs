pub mod config;
pub mod modules;
pub mod services;

use std::sync::Arc;

use config::{Config, DbPool};
use modules::account::crud::MySqlAccountStore;
use modules::account::interface::AccountStore;
use modules::account::AccountService;
use modules::image::crud::MySqlImageStore;
use modules::image::interface::ImageStore;
use modules::image::ImageService;
use modules::product::crud::MySqlProductStore;
use modules::product::interface::ProductStore;
use modules::product::ProductService;
use modules::verification::crud::MySqlVerificationStore;
use modules::verification::{VerificationService, VerificationStore};
use services::hashing::{Argon2Hasher, CredentialHasher};
use services::metrics::MetricsRegistry;
use services::notify::{HttpTopicPublisher, NoopPublisher, NotificationDispatcher, TopicPublisher};
use services::storage::{HttpObjectStore, NoopObjectStore, ObjectStore};

/// Fully wired service core. Collaborators are injected at construction;
/// endpoints absent from the configuration get no-op stand-ins so business
/// logic never branches on a missing client.
pub struct Core {
    pub accounts: Arc<AccountService>,
    pub products: Arc<ProductService>,
    pub images: Arc<ImageService>,
    pub verification: Arc<VerificationService>,
    pub metrics: Arc<MetricsRegistry>,
}

impl Core {
    pub fn new(db: DbPool, config: &Config) -> Result<Self, prometheus::Error> {
        let metrics = MetricsRegistry::new()?;

        let publisher: Arc<dyn TopicPublisher> = match &config.notification_endpoint {
            Some(endpoint) => Arc::new(HttpTopicPublisher::new(endpoint.clone())),
            None => Arc::new(NoopPublisher),
        };

        let objects: Arc<dyn ObjectStore> = match &config.storage_endpoint {
            Some(endpoint) => Arc::new(HttpObjectStore::new(
                endpoint.clone(),
                config.storage_bucket.clone(),
                metrics.clone(),
            )),
            None => Arc::new(NoopObjectStore),
        };

        let account_store: Arc<dyn AccountStore> = Arc::new(MySqlAccountStore::new(db.clone()));
        let product_store: Arc<dyn ProductStore> = Arc::new(MySqlProductStore::new(db.clone()));
        let image_store: Arc<dyn ImageStore> = Arc::new(MySqlImageStore::new(db.clone()));
        let verification_store: Arc<dyn VerificationStore> =
            Arc::new(MySqlVerificationStore::new(db));

        let verification = Arc::new(VerificationService::new(
            verification_store,
            config.verification_ttl_secs,
            metrics.clone(),
        ));

        let dispatcher = Arc::new(NotificationDispatcher::new(
            publisher,
            config.notification_topic.clone(),
            metrics.clone(),
        ));

        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new());

        let accounts = Arc::new(AccountService::new(
            account_store.clone(),
            hasher,
            verification.clone(),
            dispatcher,
        ));

        let products = Arc::new(ProductService::new(
            product_store.clone(),
            account_store.clone(),
            image_store.clone(),
            objects.clone(),
        ));

        let images = Arc::new(ImageService::new(
            image_store,
            product_store,
            account_store,
            objects,
        ));

        Ok(Self {
            accounts,
            products,
            images,
            verification,
            metrics,
        })
    }
}
