//! Workflow tests over in-memory stores

mod common;

use std::sync::Arc;

use auth::application::{AuthWorkflow, LoginInput};
use auth::domain::repository::{CredentialStore, ProfileStore};
use auth::domain::value_object::{email::Email, user_id::UserId};
use auth::domain::{ProfileRecord, SessionToken, TokenError, TokenService};
use auth::error::{AuthError, AuthResult};
use auth::infra::InMemoryProfileStore;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use kernel::error::kind::ErrorKind;

use common::{Harness, ada, other_token_service, test_config};

fn login(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_register_login_resolve_scenario() {
    let harness = Harness::new();
    let workflow = harness.workflow();

    let user_id = workflow.register(ada()).await.unwrap();

    let token = workflow.login(login("ada@x.com", "secret123")).await.unwrap();
    assert_eq!(token.subject(), &user_id);
    assert_eq!(harness.tokens.verify(token.as_str()).unwrap(), user_id);

    let identity = workflow.resolve_session(token.as_str()).await.unwrap();
    assert_eq!(identity.user_id, user_id);
    assert_eq!(identity.username, "ada");
    assert_eq!(identity.email.as_str(), "ada@x.com");
    assert_eq!(identity.first_name, "Ada");
    assert_eq!(identity.last_name, "Lovelace");
    assert_eq!(identity.mobile, "555");

    let err = workflow.login(login("ada@x.com", "wrong")).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = workflow.login(login("nobody@x.com", "x")).await.unwrap_err();
    assert!(matches!(err, AuthError::NotFound));
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let harness = Harness::new();
    let workflow = harness.workflow();
    let user_id = workflow.register(ada()).await.unwrap();

    let token = workflow.login(login("  ADA@X.com ", "secret123")).await.unwrap();
    assert_eq!(token.subject(), &user_id);
}

#[tokio::test]
async fn test_login_with_malformed_email_is_not_found() {
    let workflow = Harness::new().workflow();
    let err = workflow.login(login("not-an-email", "secret123")).await.unwrap_err();
    assert!(matches!(err, AuthError::NotFound));
}

#[tokio::test]
async fn test_password_is_stored_as_argon2id_hash() {
    let harness = Harness::new();
    harness.workflow().register(ada()).await.unwrap();

    let record = harness
        .credentials
        .find_by_email(&Email::new("ada@x.com").unwrap())
        .await
        .unwrap()
        .unwrap();
    let phc = record.password_hash.as_phc_string();
    assert!(phc.starts_with("$argon2id$"));
    assert!(!phc.contains("secret123"));
}

#[tokio::test]
async fn test_identity_never_exposes_hash() {
    let harness = Harness::new();
    let workflow = harness.workflow();
    let user_id = workflow.register(ada()).await.unwrap();

    let identity = workflow.identity(&user_id).await.unwrap();
    assert!(!format!("{:?}", identity).contains("argon2"));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let harness = Harness::new();
    let workflow = harness.workflow();
    workflow.register(ada()).await.unwrap();

    let mut again = ada();
    again.email = "ADA@x.com".to_string();
    again.username = "ada2".to_string();
    let err = workflow.register(again).await.unwrap_err();

    assert!(matches!(err, AuthError::Conflict));
    assert_eq!(harness.credentials.len().await, 1);
    assert_eq!(harness.profiles.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_duplicate_registrations_store_decides() {
    // Both may pass the advisory pre-check; the store's uniqueness picks one
    let harness = Harness::new();
    let workflow = harness.workflow();

    let (first, second) = tokio::join!(workflow.register(ada()), workflow.register(ada()));

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(AuthError::Conflict)))
    );
    assert_eq!(harness.credentials.len().await, 1);
    assert_eq!(harness.profiles.len().await, 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let harness = Harness::new();
    let workflow = harness.workflow();

    let mut bad_email = ada();
    bad_email.email = "ada-at-x.com".to_string();
    let err = workflow.register(bad_email).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    let mut blank_password = ada();
    blank_password.password = "   ".to_string();
    let err = workflow.register(blank_password).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);

    assert!(harness.credentials.is_empty().await);
    assert!(harness.profiles.is_empty().await);
}

#[tokio::test]
async fn test_short_password_registers_and_logs_in() {
    let workflow = Harness::new().workflow();

    let mut input = ada();
    input.password = "abc".to_string();
    let user_id = workflow.register(input).await.unwrap();

    let token = workflow.login(login("ada@x.com", "abc")).await.unwrap();
    assert_eq!(token.subject(), &user_id);
}

#[tokio::test]
async fn test_identifiers_are_unique_per_registration() {
    let workflow = Harness::new().workflow();

    let a = workflow.register(ada()).await.unwrap();
    let mut other = ada();
    other.email = "grace@x.com".to_string();
    let b = workflow.register(other).await.unwrap();

    assert_ne!(a, b);
}

#[tokio::test]
async fn test_deleted_user_token_resolves_to_not_found() {
    let harness = Harness::new();
    let workflow = harness.workflow();
    let user_id = workflow.register(ada()).await.unwrap();
    let token = workflow.login(login("ada@x.com", "secret123")).await.unwrap();

    harness.credentials.remove(&user_id).await.unwrap();

    // Signature still verifies; the identity does not
    assert_eq!(harness.tokens.verify(token.as_str()).unwrap(), user_id);
    let err = workflow.resolve_session(token.as_str()).await.unwrap_err();
    assert!(matches!(err, AuthError::NotFound));
}

#[tokio::test]
async fn test_tampered_token_is_unauthorized() {
    let harness = Harness::new();
    let workflow = harness.workflow();
    workflow.register(ada()).await.unwrap();
    let token = workflow
        .login(login("ada@x.com", "secret123"))
        .await
        .unwrap()
        .into_string();

    let (message, signature) = token.rsplit_once('.').unwrap();
    let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
    bytes[0] ^= 0x80;
    let tampered = format!("{}.{}", message, URL_SAFE_NO_PAD.encode(&bytes));

    let err = workflow.resolve_session(&tampered).await.unwrap_err();
    assert!(matches!(
        err,
        AuthError::InvalidToken(TokenError::InvalidSignature)
    ));
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_foreign_and_garbage_tokens_are_unauthorized() {
    let harness = Harness::new();
    let workflow = harness.workflow();
    let user_id = workflow.register(ada()).await.unwrap();

    let foreign = other_token_service().issue(&user_id).unwrap();
    let err = workflow.resolve_session(foreign.as_str()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    for garbage in ["", "abc", "a.b.c", "Bearer x"] {
        let err = workflow.resolve_session(garbage).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized, "token {:?}", garbage);
    }
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let harness = Harness::new();
    let workflow = harness.workflow();
    let user_id = workflow.register(ada()).await.unwrap();

    let stale = harness
        .tokens
        .issue_at(&user_id, chrono::Utc::now() - chrono::TimeDelta::minutes(9))
        .unwrap();

    let err = workflow.resolve_session(stale.as_str()).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken(TokenError::Expired)));
}

// ============================================================================
// Orphaned credential records
// ============================================================================

struct FailingProfileStore;

impl ProfileStore for FailingProfileStore {
    async fn find_by_identifier(&self, _user_id: &UserId) -> AuthResult<Option<ProfileRecord>> {
        Ok(None)
    }

    async fn insert(&self, _record: &ProfileRecord) -> AuthResult<()> {
        Err(AuthError::Internal("profile store unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_failed_profile_write_leaves_orphan() {
    let harness = Harness::new();
    let failing = AuthWorkflow::new(
        Arc::clone(&harness.credentials),
        Arc::new(FailingProfileStore),
        Arc::clone(&harness.tokens),
        test_config(),
    );

    let err = failing.register(ada()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InternalServerError);

    // The credential write is not rolled back
    assert_eq!(harness.credentials.len().await, 1);
    assert!(harness.profiles.is_empty().await);

    // Against a healthy profile store the orphan still looks like no user
    let workflow = harness.workflow();
    let token = workflow.login(login("ada@x.com", "secret123")).await.unwrap();
    let err = workflow.resolve_session(token.as_str()).await.unwrap_err();
    assert!(matches!(err, AuthError::NotFound));

    // And the email stays taken
    let err = workflow.register(ada()).await.unwrap_err();
    assert!(matches!(err, AuthError::Conflict));
}

#[tokio::test]
async fn test_profile_conflict_is_reported_as_internal() {
    // A profile store that already holds the identifier: a write failure
    // after the credential write must still surface as internal
    struct DuplicateProfileStore(InMemoryProfileStore);

    impl ProfileStore for DuplicateProfileStore {
        async fn find_by_identifier(&self, user_id: &UserId) -> AuthResult<Option<ProfileRecord>> {
            self.0.find_by_identifier(user_id).await
        }

        async fn insert(&self, _record: &ProfileRecord) -> AuthResult<()> {
            Err(AuthError::Conflict)
        }
    }

    let harness = Harness::new();
    let workflow = AuthWorkflow::new(
        Arc::clone(&harness.credentials),
        Arc::new(DuplicateProfileStore(InMemoryProfileStore::new())),
        Arc::clone(&harness.tokens),
        test_config(),
    );

    let err = workflow.register(ada()).await.unwrap_err();
    assert!(matches!(err, AuthError::Internal(_)));
}

struct BrokenSigner;

impl TokenService for BrokenSigner {
    fn issue(&self, _subject: &UserId) -> Result<SessionToken, TokenError> {
        Err(TokenError::Signing("key unavailable".to_string()))
    }

    fn verify(&self, _token: &str) -> Result<UserId, TokenError> {
        Err(TokenError::Malformed)
    }
}

#[tokio::test]
async fn test_signing_failure_at_login_is_internal() {
    let harness = Harness::new();
    harness.workflow().register(ada()).await.unwrap();

    let workflow = AuthWorkflow::new(
        Arc::clone(&harness.credentials),
        Arc::clone(&harness.profiles),
        Arc::new(BrokenSigner),
        test_config(),
    );

    let err = workflow.login(login("ada@x.com", "secret123")).await.unwrap_err();
    assert!(matches!(err, AuthError::Internal(_)));
    assert_eq!(err.kind(), ErrorKind::InternalServerError);
    assert_eq!(err.to_app_error().message(), "Internal server error");
}
