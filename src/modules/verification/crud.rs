use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::DbPool;

use super::interface::{Result, VerificationError, VerificationStore};
use super::model::EmailVerification;

/// MySQL-backed verification store.
pub struct MySqlVerificationStore {
    pool: DbPool,
}

impl MySqlVerificationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VerificationStore for MySqlVerificationStore {
    async fn save(&self, record: &EmailVerification) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO email_verifications (id, email, token, created_at, expires_at, verified)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.email)
        .bind(&record.token)
        .bind(record.created_at)
        .bind(record.expires_at)
        .bind(record.verified)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EmailVerification>> {
        let record =
            sqlx::query_as::<_, EmailVerification>("SELECT * FROM email_verifications WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(record)
    }

    async fn find_by_email_and_token(
        &self,
        email: &str,
        token: &str,
    ) -> Result<Option<EmailVerification>> {
        let record = sqlx::query_as::<_, EmailVerification>(
            "SELECT * FROM email_verifications WHERE email = ? AND token = ?",
        )
        .bind(email)
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_latest_by_email(&self, email: &str) -> Result<Option<EmailVerification>> {
        let record = sqlx::query_as::<_, EmailVerification>(
            "SELECT * FROM email_verifications WHERE email = ? ORDER BY created_at DESC LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn exists_live_for_email(&self, email: &str, now: DateTime<Utc>) -> Result<bool> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM email_verifications WHERE email = ? AND verified = false AND expires_at > ?",
        )
        .bind(email)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    async fn confirm(&self, record_id: &str, email: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE email_verifications SET verified = true WHERE id = ?")
            .bind(record_id)
            .execute(&mut *tx)
            .await?;

        let updated = sqlx::query("UPDATE accounts SET verified = true, updated_at = ? WHERE email = ?")
            .bind(Utc::now())
            .bind(email)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(VerificationError::MissingAccount(email.to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM email_verifications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM email_verifications WHERE expires_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
