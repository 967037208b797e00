mod common;

use std::sync::Arc;

use common::login_command;
use common::TestIdentity;
use identity_service::domain::account::models::Role;
use identity_service::domain::account::ports::AccountRepository;
use identity_service::domain::auth::errors::AuthError;
use identity_service::domain::auth::ports::AuthServicePort;
use identity_service::domain::session::errors::SessionError;
use identity_service::domain::session::models::RevocationReason;
use identity_service::domain::session::ports::RefreshTokenRepository;

async fn seeded_session(identity: &TestIdentity) -> String {
    identity
        .seed_account("ada@example.com", "correct horse", Role::User)
        .await;
    identity
        .auth
        .login(login_command("ada@example.com", "correct horse"))
        .await
        .expect("Login failed")
        .refresh_token
}

#[tokio::test]
async fn test_rotation_issues_successor_and_revokes_presented() {
    let identity = TestIdentity::new();
    let first = seeded_session(&identity).await;

    let refreshed = identity.auth.refresh(&first).await.expect("Refresh failed");
    assert_ne!(refreshed.refresh_token, first);
    assert!(!refreshed.access_token.is_empty());

    let stored = identity
        .session_store
        .find_by_value(&first)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.revoked);
    assert_eq!(stored.revoked_reason, Some(RevocationReason::Rotated));
    assert_eq!(stored.successor, Some(refreshed.refresh_token.clone()));

    // The successor is live and rotates in turn.
    assert!(identity.auth.refresh(&refreshed.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_reuse_of_rotated_token_revokes_whole_chain() {
    let identity = TestIdentity::new();
    let r1 = seeded_session(&identity).await;

    let r2 = identity.auth.refresh(&r1).await.unwrap().refresh_token;
    let r3 = identity.auth.refresh(&r2).await.unwrap().refresh_token;

    // Replaying r1 is reuse: someone other than the chain holder has it.
    let replay = identity.auth.refresh(&r1).await;
    assert!(matches!(
        replay,
        Err(AuthError::Session(SessionError::TokenRevoked))
    ));

    // The cascade reached the newest generation.
    let stored = identity
        .session_store
        .find_by_value(&r3)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.revoked);
    assert_eq!(stored.revoked_reason, Some(RevocationReason::Explicit));

    let after_cascade = identity.auth.refresh(&r3).await;
    assert!(matches!(
        after_cascade,
        Err(AuthError::Session(SessionError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_unknown_refresh_token_is_rejected() {
    let identity = TestIdentity::new();
    seeded_session(&identity).await;

    let result = identity.auth.refresh("no-such-token").await;
    assert!(matches!(
        result,
        Err(AuthError::Session(SessionError::TokenNotFound))
    ));
}

#[tokio::test]
async fn test_expired_refresh_token_is_rejected_without_revocation() {
    let identity = TestIdentity::new();
    let token = seeded_session(&identity).await;

    identity.expire_refresh_token(&token).await;

    let result = identity.auth.refresh(&token).await;
    assert!(matches!(
        result,
        Err(AuthError::Session(SessionError::TokenExpired))
    ));

    // Expiry is not reuse; the record stays as it was.
    let stored = identity
        .session_store
        .find_by_value(&token)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.revoked);
}

#[tokio::test]
async fn test_concurrent_rotation_has_exactly_one_winner() {
    let identity = Arc::new(TestIdentity::new());
    let token = seeded_session(&identity).await;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let identity = Arc::clone(&identity);
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            identity.auth.refresh(&token).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_refresh_for_deactivated_account_kills_all_sessions() {
    let identity = TestIdentity::new();
    let account = identity
        .seed_account("ada@example.com", "correct horse", Role::User)
        .await;

    let token = identity
        .auth
        .login(login_command("ada@example.com", "correct horse"))
        .await
        .unwrap()
        .refresh_token;

    let mut deactivated = identity.stored_account(&account.id).await;
    deactivated.is_active = false;
    identity.accounts.update(deactivated).await.unwrap();

    let result = identity.auth.refresh(&token).await;
    assert!(matches!(result, Err(AuthError::AccountInactive)));

    // Nothing of the chain survives, successor included.
    let stored = identity
        .session_store
        .find_by_value(&token)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.revoked);
    if let Some(successor) = stored.successor {
        let successor = identity
            .session_store
            .find_by_value(&successor)
            .await
            .unwrap()
            .unwrap();
        assert!(successor.revoked);
    }
}

#[tokio::test]
async fn test_logout_revokes_token_and_is_idempotent() {
    let identity = TestIdentity::new();
    let token = seeded_session(&identity).await;

    identity.auth.logout(&token).await.expect("Logout failed");

    let stored = identity
        .session_store
        .find_by_value(&token)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.revoked);
    assert_eq!(stored.revoked_reason, Some(RevocationReason::Logout));

    // Repeats and unknown values both succeed quietly.
    assert!(identity.auth.logout(&token).await.is_ok());
    assert!(identity.auth.logout("no-such-token").await.is_ok());

    let result = identity.auth.refresh(&token).await;
    assert!(matches!(
        result,
        Err(AuthError::Session(SessionError::TokenRevoked))
    ));
}

#[tokio::test]
async fn test_logout_all_revokes_every_device_session() {
    let identity = TestIdentity::new();
    let account = identity
        .seed_account("ada@example.com", "correct horse", Role::User)
        .await;

    let laptop = identity
        .auth
        .login(login_command("ada@example.com", "correct horse"))
        .await
        .unwrap()
        .refresh_token;
    let phone = identity
        .auth
        .login(login_command("ada@example.com", "correct horse"))
        .await
        .unwrap()
        .refresh_token;

    identity
        .auth
        .logout_all(&account.id)
        .await
        .expect("Logout-all failed");

    for token in [laptop, phone] {
        let stored = identity
            .session_store
            .find_by_value(&token)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.revoked);
        assert_eq!(stored.revoked_reason, Some(RevocationReason::Logout));
    }
}

#[tokio::test]
async fn test_sweep_drops_rotated_tokens_but_keeps_live_ones() {
    let identity = TestIdentity::new();
    let first = seeded_session(&identity).await;
    let current = identity.auth.refresh(&first).await.unwrap().refresh_token;

    let swept = identity.session_store.sweep_expired().await.unwrap();
    assert_eq!(swept, 1);

    assert!(identity
        .session_store
        .find_by_value(&first)
        .await
        .unwrap()
        .is_none());
    assert!(identity
        .session_store
        .find_by_value(&current)
        .await
        .unwrap()
        .is_some());
}
