use async_trait::async_trait;

use crate::modules::verification::VerificationError;
use crate::services::authz::Forbidden;
use crate::services::hashing::HashError;
use crate::services::notify::DispatchError;

use super::model::Account;

pub type Result<T> = std::result::Result<T, AccountError>;

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create(&self, account: &Account) -> std::result::Result<(), sqlx::Error>;
    async fn find_by_id(&self, id: &str) -> std::result::Result<Option<Account>, sqlx::Error>;
    async fn find_by_email(&self, email: &str) -> std::result::Result<Option<Account>, sqlx::Error>;
    async fn email_exists(&self, email: &str) -> std::result::Result<bool, sqlx::Error>;
    async fn update(&self, account: &Account) -> std::result::Result<(), sqlx::Error>;

    /// Deletes the account addressed by email. Owned products and their
    /// image rows go with it (store-level cascade).
    async fn delete_by_email(&self, email: &str) -> std::result::Result<(), sqlx::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("account not found")]
    NotFound,

    #[error(transparent)]
    Forbidden(#[from] Forbidden),

    #[error("email already registered")]
    EmailTaken,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Hashing(#[from] HashError),

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
