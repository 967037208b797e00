use async_trait::async_trait;
use chrono::Duration;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;

/// Persistence operations for the account aggregate.
///
/// The login-counter operations are part of the port because the
/// check-and-update must be a single atomic step at the storage layer:
/// concurrent failed logins for one account must never lose an
/// increment, and a read-then-write pair in the service would.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve account by normalized email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Update an existing account record in full.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Storage operation failed
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// Atomically record a failed login.
    ///
    /// In one storage step: if the previous failure lies outside
    /// `window` (or there is none), the counter restarts at 1;
    /// otherwise it increments. `last_failed_login` is stamped with
    /// the current time either way.
    ///
    /// # Returns
    /// The new consecutive-failure count
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Storage operation failed
    async fn record_login_failure(
        &self,
        id: &AccountId,
        window: Duration,
    ) -> Result<u32, AccountError>;

    /// Atomically record a successful login.
    ///
    /// Zeroes the failure counter, clears the window anchor and stamps
    /// `last_successful_login`.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Storage operation failed
    async fn record_login_success(&self, id: &AccountId) -> Result<(), AccountError>;

    /// Replace the stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Storage operation failed
    async fn update_password(
        &self,
        id: &AccountId,
        password_hash: String,
    ) -> Result<(), AccountError>;
}
