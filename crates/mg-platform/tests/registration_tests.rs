//! Registration Saga Tests
//!
//! Exercises the full onboarding flow against in-memory stores: happy path,
//! uniqueness checks, error aggregation, and the rollback guarantees.

mod common;

use std::sync::atomic::Ordering;

use common::{assert_success, request, TestHarness};
use mg_platform::CatalogStore;

#[tokio::test]
async fn register_creates_principal_restaurant_and_token() {
    let h = TestHarness::new();

    let result = h
        .registration
        .register(request("a", "a@x.com", "P@ssw0rd1"))
        .await;
    assert_success(&result);

    // Principal created with the pending role.
    assert_eq!(h.identity.principal_count(), 1);
    let principal_id = result.principal_id.clone().unwrap();
    let principal = h.identity.get(&principal_id).unwrap();
    assert!(principal.has_role("PendingStore"));

    // Restaurant persisted and linked to the new principal.
    assert_eq!(h.catalog.restaurant_count(), 1);
    let restaurants = h.catalog.find_all().await.unwrap();
    assert_eq!(restaurants[0].security_id, principal_id);

    // Result carries the identity fields and exactly one role.
    assert_eq!(result.username.as_deref(), Some("a"));
    assert_eq!(result.email.as_deref(), Some("a@x.com"));
    assert_eq!(result.roles, vec!["PendingStore".to_string()]);

    // The token's role claims are exactly ["PendingStore"] and the expiry
    // matches the configured 7 days.
    let claims = h.tokens.validate(result.token.as_deref().unwrap()).unwrap();
    assert_eq!(claims.roles, vec!["PendingStore".to_string()]);
    assert_eq!(claims.uid, principal_id);
    let expires_on = result.expires_on.unwrap();
    let lifetime_secs = (expires_on - chrono::Local::now()).num_seconds();
    assert!((lifetime_secs - 7 * 86_400).abs() <= 2);
}

#[tokio::test]
async fn repeated_registration_fails_and_leaves_state_unchanged() {
    let h = TestHarness::new();

    assert_success(
        &h.registration
            .register(request("a", "a@x.com", "P@ssw0rd1"))
            .await,
    );

    let result = h
        .registration
        .register(request("a", "a@x.com", "P@ssw0rd1"))
        .await;
    assert_eq!(result.message.as_deref(), Some("Email is already registered!"));
    assert!(!result.is_authenticated);

    // State unchanged from after the first call.
    assert_eq!(h.identity.principal_count(), 1);
    assert_eq!(h.catalog.restaurant_count(), 1);
}

#[tokio::test]
async fn email_check_wins_when_both_email_and_username_are_taken() {
    let h = TestHarness::new();

    assert_success(
        &h.registration
            .register(request("taken", "taken@x.com", "P@ssw0rd1"))
            .await,
    );

    // Same email AND same username: the email message must win.
    let result = h
        .registration
        .register(request("taken", "taken@x.com", "P@ssw0rd1"))
        .await;
    assert_eq!(result.message.as_deref(), Some("Email is already registered!"));
}

#[tokio::test]
async fn duplicate_username_alone_reports_username_message() {
    let h = TestHarness::new();

    assert_success(
        &h.registration
            .register(request("taken", "first@x.com", "P@ssw0rd1"))
            .await,
    );

    let result = h
        .registration
        .register(request("taken", "second@x.com", "P@ssw0rd1"))
        .await;
    assert_eq!(
        result.message.as_deref(),
        Some("Username is already registered!")
    );
}

#[tokio::test]
async fn rejected_password_aggregates_all_errors_into_one_message() {
    let h = TestHarness::new();

    let result = h.registration.register(request("a", "a@x.com", "abc")).await;
    let message = result.message.unwrap();

    // Too short, no digit, no uppercase, no special character: four
    // descriptions, each terminated by a comma.
    assert!(message.contains("at least 6 characters"));
    assert!(message.contains("digit"));
    assert!(message.contains("uppercase"));
    assert_eq!(message.matches("Passwords must").count(), 4);
    assert_eq!(message.matches(',').count(), 4);
    assert!(message.ends_with(','));

    // Nothing was created.
    assert_eq!(h.identity.principal_count(), 0);
    assert_eq!(h.catalog.restaurant_count(), 0);
}

#[tokio::test]
async fn failed_restaurant_insert_rolls_back_the_principal() {
    let h = TestHarness::new();
    h.catalog.fail_insert.store(true, Ordering::SeqCst);

    let result = h
        .registration
        .register(request("a", "a@x.com", "P@ssw0rd1"))
        .await;

    assert!(!result.is_authenticated);
    assert!(result.message.unwrap().contains("catalog store unavailable"));

    // Atomicity: neither the principal nor the restaurant survives.
    assert_eq!(h.identity.principal_count(), 0);
    assert_eq!(h.catalog.restaurant_count(), 0);
    assert_eq!(h.identity.deleted.lock().len(), 1);
}

#[tokio::test]
async fn failed_role_assignment_rolls_back_the_principal() {
    let h = TestHarness::new();
    h.identity.fail_add_role.store(true, Ordering::SeqCst);

    let result = h
        .registration
        .register(request("a", "a@x.com", "P@ssw0rd1"))
        .await;

    assert!(!result.is_authenticated);
    assert_eq!(h.identity.principal_count(), 0);
    assert_eq!(h.catalog.restaurant_count(), 0);
}

#[tokio::test]
async fn rollback_failure_is_swallowed_and_original_message_survives() {
    let h = TestHarness::new();
    h.catalog.fail_insert.store(true, Ordering::SeqCst);
    h.identity.fail_delete.store(true, Ordering::SeqCst);

    let result = h
        .registration
        .register(request("a", "a@x.com", "P@ssw0rd1"))
        .await;

    // The caller sees the catalog failure, not the rollback failure.
    assert!(result.message.unwrap().contains("catalog store unavailable"));
    assert!(!result.is_authenticated);

    // The orphaned principal is the accepted weak spot of best-effort
    // rollback; the delete was attempted but failed.
    assert_eq!(h.identity.principal_count(), 1);
    assert_eq!(h.catalog.restaurant_count(), 0);
}

#[tokio::test]
async fn identity_store_failure_at_create_needs_no_rollback() {
    let h = TestHarness::new();
    h.identity.fail_create.store(true, Ordering::SeqCst);

    let result = h
        .registration
        .register(request("a", "a@x.com", "P@ssw0rd1"))
        .await;

    assert_eq!(
        result.message.as_deref(),
        Some("Identity store unavailable.,")
    );
    assert!(h.identity.deleted.lock().is_empty());
}

#[tokio::test]
async fn failed_claims_lookup_rolls_back_the_principal() {
    let h = TestHarness::new();
    h.identity.fail_claims.store(true, Ordering::SeqCst);

    let result = h
        .registration
        .register(request("a", "a@x.com", "P@ssw0rd1"))
        .await;

    assert!(!result.is_authenticated);
    assert!(result.message.unwrap().contains("claim store unavailable"));

    // The principal existed before token assembly failed; the compensation
    // must have deleted it, and no restaurant may have been written.
    assert_eq!(h.identity.principal_count(), 0);
    assert_eq!(h.catalog.restaurant_count(), 0);
    assert_eq!(h.identity.deleted.lock().len(), 1);
}

#[tokio::test]
async fn login_issues_token_with_current_roles() {
    let h = TestHarness::new();

    let registered = h
        .registration
        .register(request("a", "a@x.com", "P@ssw0rd1"))
        .await;
    assert_success(&registered);

    let result = h.registration.login("a@x.com", "P@ssw0rd1").await;
    assert_success(&result);
    assert_eq!(result.roles, vec!["PendingStore".to_string()]);

    let claims = h.tokens.validate(result.token.as_deref().unwrap()).unwrap();
    assert_eq!(claims.sub, "a");
}

#[tokio::test]
async fn login_with_bad_credentials_reports_one_generic_message() {
    let h = TestHarness::new();

    assert_success(
        &h.registration
            .register(request("a", "a@x.com", "P@ssw0rd1"))
            .await,
    );

    let wrong_password = h.registration.login("a@x.com", "WrongP@ss1").await;
    assert_eq!(
        wrong_password.message.as_deref(),
        Some("Email or Password is incorrect!")
    );

    let unknown_email = h.registration.login("nobody@x.com", "P@ssw0rd1").await;
    assert_eq!(
        unknown_email.message.as_deref(),
        Some("Email or Password is incorrect!")
    );
}
