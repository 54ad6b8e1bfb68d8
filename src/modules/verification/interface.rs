use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::EmailVerification;

pub type Result<T> = std::result::Result<T, VerificationError>;

/// Durable store for verification records. `confirm` is the one compound
/// operation: it marks the record verified and flips the owning account's
/// `verified` flag in a single atomic unit of work, because only the store
/// can guarantee the two writes land together.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    async fn save(&self, record: &EmailVerification) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<EmailVerification>>;

    async fn find_by_email_and_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Option<EmailVerification>>;

    async fn find_latest_by_email(&self, email: &str) -> Result<Option<EmailVerification>>;

    /// True when an unexpired, unverified record exists for the email.
    /// Drives duplicate-send suppression.
    async fn exists_live_for_email(&self, email: &str, now: DateTime<Utc>) -> Result<bool>;

    /// Marks the record verified and the owning account verified, atomically.
    /// Fails with `MissingAccount` when no account exists for the email.
    async fn confirm(&self, record_id: &str, email: &str) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Removes every record with `expires_at` strictly before the cutoff,
    /// verified or not. Returns the number of rows removed.
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("invalid verification token")]
    InvalidToken,

    #[error("email already verified")]
    AlreadyVerified,

    #[error("verification token has expired")]
    Expired,

    /// Data-integrity fault: a verification record should never outlive its
    /// account. Not recoverable by retry.
    #[error("verification record references missing account: {0}")]
    MissingAccount(String),

    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}
