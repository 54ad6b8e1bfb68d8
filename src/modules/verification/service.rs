use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::services::metrics::{MetricsRegistry, VerificationMetricsCollector};
use crate::services::token;

use super::interface::{Result, VerificationError, VerificationStore};
use super::model::EmailVerification;

/// Outcome of an issue request. `Suppressed` means a live token is already
/// outstanding for the email and no new record was created.
#[derive(Debug)]
pub enum IssueOutcome {
    Issued { token: String },
    Suppressed,
}

/// Owns the verification token lifecycle: issuance with duplicate-send
/// suppression, single-use redemption, and expiry.
pub struct VerificationService {
    store: Arc<dyn VerificationStore>,
    ttl: Duration,
    collector: VerificationMetricsCollector,
}

impl VerificationService {
    pub fn new(
        store: Arc<dyn VerificationStore>,
        ttl_secs: i64,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            store,
            ttl: Duration::seconds(ttl_secs),
            collector: VerificationMetricsCollector::new(metrics),
        }
    }

    /// Issues a fresh token for the email unless a live one is already
    /// outstanding. The suppression check is read-then-write; the store's
    /// token uniqueness constraint is the backstop for the concurrent-signup
    /// race.
    pub async fn issue(&self, email: &str) -> Result<IssueOutcome> {
        let now = Utc::now();

        if self.store.exists_live_for_email(email, now).await? {
            self.collector.record_suppressed();
            tracing::warn!("live verification token already outstanding for {}", email);
            return Ok(IssueOutcome::Suppressed);
        }

        let record = EmailVerification {
            id: token::new_id(),
            email: email.to_string(),
            token: token::new_token(),
            created_at: now,
            expires_at: now + self.ttl,
            verified: false,
        };

        self.store.save(&record).await?;
        self.collector.record_issued();
        tracing::info!(
            "verification token created for {}, expires at {}",
            email,
            record.expires_at
        );

        Ok(IssueOutcome::Issued {
            token: record.token,
        })
    }

    /// Redeems a token. Outcome ordering is deliberate: an unknown pair is
    /// `InvalidToken`; a known-but-verified record is `AlreadyVerified` even
    /// when it has since expired; only a live-but-stale record is `Expired`.
    pub async fn verify(&self, email: &str, token: &str) -> Result<()> {
        let record = match self.store.find_by_email_and_token(email, token).await? {
            Some(record) => record,
            None => {
                self.collector.record_check("invalid");
                return Err(VerificationError::InvalidToken);
            }
        };

        if record.verified {
            self.collector.record_check("replayed");
            return Err(VerificationError::AlreadyVerified);
        }

        if record.is_expired_at(Utc::now()) {
            self.collector.record_check("expired");
            return Err(VerificationError::Expired);
        }

        match self.store.confirm(&record.id, email).await {
            Ok(()) => {
                self.collector.record_check("verified");
                tracing::info!("email verified successfully for {}", email);
                Ok(())
            }
            Err(e) => {
                if matches!(&e, VerificationError::MissingAccount(_)) {
                    tracing::error!("data integrity fault during verification: {}", e);
                }
                self.collector.record_check("error");
                Err(e)
            }
        }
    }

    /// Deletes every record expired before `now`, verified or not.
    /// Idempotent and safe to run concurrently with issue/verify.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let deleted = self.store.delete_expired_before(now).await?;
        self.collector.record_swept(deleted);
        Ok(deleted)
    }
}
