mod common;

use chrono::{Duration, Utc};
use product_service::modules::verification::{EmailVerification, IssueOutcome, VerificationError};

use crate::common::{account_request, test_email, TestContext, TTL_SECS};

// =============================================================================
// ISSUE + SUPPRESSION
// =============================================================================

#[tokio::test]
async fn issue_creates_record_with_configured_ttl() {
    let ctx = TestContext::new();
    let email = test_email();

    let outcome = ctx.verification.issue(&email).await.unwrap();
    assert!(matches!(outcome, IssueOutcome::Issued { .. }));

    let record = ctx
        .verification_store
        .find_latest_by_email(&email)
        .await
        .unwrap()
        .expect("record should exist");

    assert!(!record.verified);
    assert_eq!(record.expires_at, record.created_at + Duration::seconds(TTL_SECS));
}

#[tokio::test]
async fn second_issue_within_window_is_suppressed() {
    let ctx = TestContext::new();
    let email = test_email();

    let first = ctx.verification.issue(&email).await.unwrap();
    let IssueOutcome::Issued { token } = first else {
        panic!("first issue should produce a token");
    };

    let second = ctx.verification.issue(&email).await.unwrap();
    assert!(matches!(second, IssueOutcome::Suppressed));

    // the first token remains the only live record
    let latest = ctx
        .verification_store
        .find_latest_by_email(&email)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.token, token);
}

#[tokio::test]
async fn suppression_window_reopens_after_sweep() {
    let ctx = TestContext::new();
    let email = test_email();

    ctx.verification.issue(&email).await.unwrap();

    // jump past expiry: the sweep removes the outstanding record
    let later = Utc::now() + Duration::seconds(TTL_SECS + 10);
    let deleted = ctx.verification.sweep_expired(later).await.unwrap();
    assert_eq!(deleted, 1);

    let outcome = ctx.verification.issue(&email).await.unwrap();
    assert!(matches!(outcome, IssueOutcome::Issued { .. }));
}

#[tokio::test]
async fn concurrent_issues_never_lose_the_redeemable_token() {
    let ctx = TestContext::new();
    let email = test_email();
    ctx.accounts.create(account_request(&email)).await.unwrap();

    // The read-then-write suppression check may race; whatever the outcome,
    // the latest stored token must remain redeemable.
    let outcomes = futures::future::join_all(
        (0..5).map(|_| ctx.verification.issue(&email)),
    )
    .await;

    let issued = outcomes
        .into_iter()
        .filter(|o| matches!(o, Ok(IssueOutcome::Issued { .. })))
        .count();
    assert!(issued >= 1);

    let token = ctx.latest_token(&email).await;
    ctx.verification.verify(&email, &token).await.unwrap();
}

// =============================================================================
// VERIFY
// =============================================================================

#[tokio::test]
async fn verify_flips_record_and_account_exactly_once() {
    let ctx = TestContext::new();
    let email = test_email();
    ctx.accounts.create(account_request(&email)).await.unwrap();

    let token = ctx.latest_token(&email).await;

    ctx.verification.verify(&email, &token).await.unwrap();

    let account = ctx
        .account_store
        .find_by_email(&email)
        .await
        .unwrap()
        .unwrap();
    assert!(account.verified);

    let record = ctx
        .verification_store
        .find_latest_by_email(&email)
        .await
        .unwrap()
        .unwrap();
    assert!(record.verified);

    // replay with the same arguments
    let replay = ctx.verification.verify(&email, &token).await;
    assert!(matches!(replay, Err(VerificationError::AlreadyVerified)));
}

#[tokio::test]
async fn verify_with_unknown_token_is_invalid() {
    let ctx = TestContext::new();
    let email = test_email();
    ctx.accounts.create(account_request(&email)).await.unwrap();

    let result = ctx.verification.verify(&email, "not-a-real-token").await;
    assert!(matches!(result, Err(VerificationError::InvalidToken)));
}

#[tokio::test]
async fn verify_requires_the_exact_email_token_pair() {
    let ctx = TestContext::new();
    let email = test_email();
    ctx.accounts.create(account_request(&email)).await.unwrap();

    let token = ctx.latest_token(&email).await;

    let result = ctx.verification.verify("someone-else@example.com", &token).await;
    assert!(matches!(result, Err(VerificationError::InvalidToken)));
}

#[tokio::test]
async fn verify_after_expiry_reports_expired() {
    let ctx = TestContext::new();
    let email = test_email();
    ctx.accounts.create(account_request(&email)).await.unwrap();

    let now = Utc::now();
    let record = EmailVerification {
        id: "ver-expired".to_string(),
        email: email.clone(),
        token: "stale-token".to_string(),
        created_at: now - Duration::seconds(600),
        expires_at: now - Duration::seconds(420),
        verified: false,
    };
    ctx.verification_store.save(&record).await.unwrap();

    let result = ctx.verification.verify(&email, "stale-token").await;
    assert!(matches!(result, Err(VerificationError::Expired)));
}

#[tokio::test]
async fn verified_then_expired_record_reports_already_verified() {
    let ctx = TestContext::new();
    let email = test_email();
    ctx.accounts.create(account_request(&email)).await.unwrap();

    // the already-verified check comes before the expiry check
    let now = Utc::now();
    let record = EmailVerification {
        id: "ver-done".to_string(),
        email: email.clone(),
        token: "redeemed-token".to_string(),
        created_at: now - Duration::seconds(600),
        expires_at: now - Duration::seconds(420),
        verified: true,
    };
    ctx.verification_store.save(&record).await.unwrap();

    let result = ctx.verification.verify(&email, "redeemed-token").await;
    assert!(matches!(result, Err(VerificationError::AlreadyVerified)));
}

#[tokio::test]
async fn verify_without_owning_account_is_an_integrity_fault() {
    let ctx = TestContext::new();
    let email = test_email();

    // record exists but no account ever did
    ctx.verification.issue(&email).await.unwrap();
    let token = ctx.latest_token(&email).await;

    let result = ctx.verification.verify(&email, &token).await;
    assert!(matches!(result, Err(VerificationError::MissingAccount(_))));
}

// =============================================================================
// SWEEP
// =============================================================================

#[tokio::test]
async fn sweep_removes_expired_records_regardless_of_verified_flag() {
    let ctx = TestContext::new();
    let now = Utc::now();

    let expired_unverified = EmailVerification {
        id: "ver-1".to_string(),
        email: "a@example.com".to_string(),
        token: "token-a".to_string(),
        created_at: now - Duration::seconds(600),
        expires_at: now - Duration::seconds(420),
        verified: false,
    };
    let expired_verified = EmailVerification {
        id: "ver-2".to_string(),
        email: "b@example.com".to_string(),
        token: "token-b".to_string(),
        created_at: now - Duration::seconds(600),
        expires_at: now - Duration::seconds(420),
        verified: true,
    };
    let live = EmailVerification {
        id: "ver-3".to_string(),
        email: "c@example.com".to_string(),
        token: "token-c".to_string(),
        created_at: now,
        expires_at: now + Duration::seconds(TTL_SECS),
        verified: false,
    };

    for record in [&expired_unverified, &expired_verified, &live] {
        ctx.verification_store.save(record).await.unwrap();
    }

    let deleted = ctx.verification.sweep_expired(now).await.unwrap();
    assert_eq!(deleted, 2);

    // the live record survives untouched
    let remaining = ctx
        .verification_store
        .find_latest_by_email("c@example.com")
        .await
        .unwrap();
    assert!(remaining.is_some());

    assert!(ctx
        .verification_store
        .find_latest_by_email("a@example.com")
        .await
        .unwrap()
        .is_none());

    // idempotent: a second sweep at the same instant removes nothing
    let deleted_again = ctx.verification.sweep_expired(now).await.unwrap();
    assert_eq!(deleted_again, 0);
}
