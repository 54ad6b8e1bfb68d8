use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One issued email-confirmation attempt. `token` is unique across the whole
/// store; `verified` flips to true exactly once and never back.
#[derive(Debug, Clone, FromRow)]
pub struct EmailVerification {
    pub id: String,
    pub email: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub verified: bool,
}

impl EmailVerification {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Live = unverified and unexpired; the only state a token can be
    /// redeemed from, and the state that suppresses re-issue.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        !self.verified && !self.is_expired_at(now)
    }
}
