use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::modules::verification::{IssueOutcome, VerificationService};
use crate::services::authz;
use crate::services::hashing::CredentialHasher;
use crate::services::notify::NotificationDispatcher;
use crate::services::token;

use super::interface::{AccountError, AccountStore, Result};
use super::model::{Account, AccountView};
use super::schema::{AccountCreateRequest, AccountUpdateRequest};

/// Account lifecycle orchestration. Creation triggers verification issue and
/// notification dispatch with full failure isolation; mutation and deletion
/// go through the ownership guard.
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn CredentialHasher>,
    verification: Arc<VerificationService>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<dyn CredentialHasher>,
        verification: Arc<VerificationService>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            store,
            hasher,
            verification,
            dispatcher,
        }
    }

    pub async fn create(&self, req: AccountCreateRequest) -> Result<AccountView> {
        req.validate()
            .map_err(|e| AccountError::Validation(e.to_string()))?;

        if self.store.email_exists(&req.email).await? {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = self.hasher.hash(&req.password)?;

        let now = Utc::now();
        let account = Account {
            id: token::new_id(),
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            verified: false,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.store.create(&account).await {
            // MySQL error 1062: the unique email constraint is the backstop
            // for concurrent signups racing past email_exists.
            if e.to_string().contains("1062") {
                return Err(AccountError::EmailTaken);
            }
            return Err(e.into());
        }
        tracing::info!("account created successfully with id {}", account.id);

        // Verification issue and dispatch must never fail account creation.
        // The owner can request a resend once the suppression window clears.
        self.issue_and_dispatch(&account.email, &account.first_name)
            .await;

        Ok(account.into())
    }

    async fn issue_and_dispatch(&self, email: &str, first_name: &str) {
        match self.verification.issue(email).await {
            Ok(IssueOutcome::Issued { token }) => {
                if let Err(e) = self
                    .dispatcher
                    .dispatch_verification(email, &token, first_name)
                    .await
                {
                    tracing::error!("failed to send verification email for {}: {}", email, e);
                }
            }
            Ok(IssueOutcome::Suppressed) => {}
            Err(e) => {
                tracing::error!("failed to issue verification token for {}: {}", email, e);
            }
        }
    }

    /// Explicit resend. Unlike creation, dispatch failures surface to the
    /// caller here. A suppressed issue is a quiet success: the outstanding
    /// token is still the one that counts.
    pub async fn resend_verification(&self, email: &str) -> Result<()> {
        let account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotFound)?;

        if account.verified {
            return Err(AccountError::Validation(
                "email is already verified".to_string(),
            ));
        }

        match self.verification.issue(email).await? {
            IssueOutcome::Issued { token } => {
                self.dispatcher
                    .dispatch_verification(email, &token, &account.first_name)
                    .await?;
                Ok(())
            }
            IssueOutcome::Suppressed => Ok(()),
        }
    }

    /// Owner-scoped read: accounts are only visible to themselves.
    pub async fn get(&self, id: &str, principal_email: &str) -> Result<AccountView> {
        let account = self.store.find_by_id(id).await?.ok_or(AccountError::NotFound)?;

        authz::authorize(principal_email, &account.email)?;

        Ok(account.into())
    }

    pub async fn update(
        &self,
        id: &str,
        req: AccountUpdateRequest,
        principal_email: &str,
    ) -> Result<AccountView> {
        let mut account = self.store.find_by_id(id).await?.ok_or(AccountError::NotFound)?;

        authz::authorize(principal_email, &account.email)?;

        let mut updated = false;
        if let Some(first_name) = req.first_name.as_deref().map(str::trim) {
            if !first_name.is_empty() {
                account.first_name = first_name.to_string();
                updated = true;
            }
        }
        if let Some(last_name) = req.last_name.as_deref().map(str::trim) {
            if !last_name.is_empty() {
                account.last_name = last_name.to_string();
                updated = true;
            }
        }
        if let Some(password) = req.password.as_deref() {
            if !password.trim().is_empty() {
                if password.len() < 8 {
                    return Err(AccountError::Validation(
                        "Password must be at least 8 characters".to_string(),
                    ));
                }
                account.password_hash = self.hasher.hash(password)?;
                updated = true;
            }
        }

        if !updated {
            return Err(AccountError::Validation(
                "no valid fields provided for update".to_string(),
            ));
        }

        account.updated_at = Utc::now();
        self.store.update(&account).await?;
        tracing::info!("account updated successfully with id {}", account.id);

        Ok(account.into())
    }

    /// Self-delete by authenticated identity, never by id, so one account can
    /// never be deleted on behalf of another.
    pub async fn delete(&self, principal_email: &str) -> Result<()> {
        self.store
            .find_by_email(principal_email)
            .await?
            .ok_or(AccountError::NotFound)?;

        self.store.delete_by_email(principal_email).await?;
        tracing::info!("account deleted: {}", principal_email);

        Ok(())
    }
}
