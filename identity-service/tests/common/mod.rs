#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use credentials::PasswordHasher;
use credentials::TokenCodec;
use identity_service::domain::account::models::Account;
use identity_service::domain::account::models::AccountId;
use identity_service::domain::account::models::EmailAddress;
use identity_service::domain::account::models::Role;
use identity_service::domain::account::ports::AccountRepository;
use identity_service::domain::auth::lockout::LockoutPolicy;
use identity_service::domain::auth::models::LoginCommand;
use identity_service::domain::auth::service::AuthService;
use identity_service::domain::password::errors::MailerError;
use identity_service::domain::password::ports::ResetMailer;
use identity_service::domain::password::service::PasswordService;
use identity_service::domain::reset::ledger::ResetTokenLedger;
use identity_service::domain::reset::models::PasswordResetToken;
use identity_service::domain::session::ledger::RefreshTokenLedger;
use identity_service::domain::session::ports::RefreshTokenRepository;
use identity_service::outbound::repositories::InMemoryAccountRepository;
use identity_service::outbound::repositories::InMemoryRefreshTokenRepository;
use identity_service::outbound::repositories::InMemoryResetTokenRepository;

pub const TEST_SECRET: &[u8] = b"integration_test_secret_32_bytes!!";

pub const LOCKOUT_MAX_FAILURES: u32 = 5;
pub const LOCKOUT_WINDOW_MINUTES: i64 = 15;

/// Mailer that records every handed-off token so tests can follow the
/// reset link the way a user would.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, PasswordResetToken)>>,
}

impl RecordingMailer {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_token(&self) -> Option<PasswordResetToken> {
        self.sent.lock().unwrap().last().map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl ResetMailer for RecordingMailer {
    async fn send_reset_link(
        &self,
        email: &EmailAddress,
        token: &PasswordResetToken,
    ) -> Result<(), MailerError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.as_str().to_string(), token.clone()));
        Ok(())
    }
}

/// Fully wired identity core over in-memory adapters.
pub struct TestIdentity {
    pub accounts: Arc<InMemoryAccountRepository>,
    pub session_store: Arc<InMemoryRefreshTokenRepository>,
    pub reset_store: Arc<InMemoryResetTokenRepository>,
    pub mailer: Arc<RecordingMailer>,
    pub auth: Arc<AuthService<InMemoryAccountRepository, InMemoryRefreshTokenRepository>>,
    pub passwords: PasswordService<
        InMemoryAccountRepository,
        InMemoryRefreshTokenRepository,
        InMemoryResetTokenRepository,
        RecordingMailer,
    >,
    hasher: PasswordHasher,
}

impl TestIdentity {
    pub fn new() -> Self {
        init_tracing();

        let accounts = Arc::new(InMemoryAccountRepository::new());
        let session_store = Arc::new(InMemoryRefreshTokenRepository::new());
        let reset_store = Arc::new(InMemoryResetTokenRepository::new());
        let mailer = Arc::new(RecordingMailer::default());

        let sessions = RefreshTokenLedger::new(Arc::clone(&session_store), Duration::days(30));
        let resets = ResetTokenLedger::new(Arc::clone(&reset_store), Duration::minutes(30));
        let lockout = LockoutPolicy::new(
            Arc::clone(&accounts),
            LOCKOUT_MAX_FAILURES,
            Duration::minutes(LOCKOUT_WINDOW_MINUTES),
        );

        let auth = Arc::new(AuthService::new(
            Arc::clone(&accounts),
            sessions.clone(),
            lockout,
            TokenCodec::new(TEST_SECRET),
            Duration::minutes(15),
        ));

        let passwords = PasswordService::new(
            Arc::clone(&accounts),
            sessions,
            resets,
            Arc::clone(&mailer),
        );

        Self {
            accounts,
            session_store,
            reset_store,
            mailer,
            auth,
            passwords,
            hasher: PasswordHasher::new(),
        }
    }

    /// Codec sharing the service's signing secret, for inspecting
    /// issued access tokens.
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(TEST_SECRET)
    }

    pub async fn seed_account(&self, email: &str, password: &str, role: Role) -> Account {
        let email = EmailAddress::new(email.to_string()).unwrap();
        let hash = self.hasher.hash(password).unwrap();
        let account = Account::new("Test Account".to_string(), email, hash, role);
        self.accounts.insert(account).await.unwrap()
    }

    pub async fn seed_inactive_account(&self, email: &str, password: &str) -> Account {
        let mut account = self.seed_account(email, password, Role::User).await;
        account.is_active = false;
        self.accounts.update(account).await.unwrap()
    }

    pub async fn stored_account(&self, id: &AccountId) -> Account {
        self.accounts.find_by_id(id).await.unwrap().unwrap()
    }

    /// Move the lockout window anchor into the past, as if the last
    /// failure happened `ago` minutes back.
    pub async fn backdate_last_failed(&self, id: &AccountId, ago_minutes: i64) {
        let mut account = self.stored_account(id).await;
        account.last_failed_login = Some(Utc::now() - Duration::minutes(ago_minutes));
        self.accounts.update(account).await.unwrap();
    }

    /// Shorten a stored refresh token's lifetime so it is already
    /// expired.
    pub async fn expire_refresh_token(&self, value: &str) {
        let mut token = self
            .session_store
            .find_by_value(value)
            .await
            .unwrap()
            .unwrap();
        token.expires_at = Utc::now() - Duration::minutes(1);
        self.session_store.insert(token).await.unwrap();
    }
}

pub fn login_command(email: &str, password: &str) -> LoginCommand {
    LoginCommand {
        email: email.to_string(),
        password: password.to_string(),
        source_ip: Some("203.0.113.7".to_string()),
        user_agent: Some("integration-tests".to_string()),
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
