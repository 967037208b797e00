use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountRepository;

/// Brute-force lockout policy.
///
/// Rolling window anchored at `last_failed_login`: once the
/// consecutive-failure count reaches the threshold, login is blocked
/// until a full window has passed since the last failure, even with
/// the correct password. Blocked attempts are not recorded, so a
/// lockout cannot extend itself; a failure recorded after the window
/// elapsed restarts the counter instead of accumulating against a
/// stale one.
pub struct LockoutPolicy<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    max_failures: u32,
    window: Duration,
}

impl<R> Clone for LockoutPolicy<R>
where
    R: AccountRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            max_failures: self.max_failures,
            window: self.window,
        }
    }
}

impl<R> LockoutPolicy<R>
where
    R: AccountRepository,
{
    /// Create a policy over the account repository.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `max_failures` - Consecutive failures before blocking (default 5)
    /// * `window` - Rolling window length (default 15 minutes)
    pub fn new(repository: Arc<R>, max_failures: u32, window: Duration) -> Self {
        Self {
            repository,
            max_failures,
            window,
        }
    }

    /// Whether a login attempt for this account is currently allowed.
    pub fn check_allowed(&self, account: &Account) -> bool {
        self.locked_until(account, Utc::now()).is_none()
    }

    /// Instant at which the current lockout ends, if one is in effect.
    ///
    /// The boundary instant itself is allowed: the block holds while
    /// strictly less than a full window has passed since the last
    /// failure.
    pub fn locked_until(&self, account: &Account, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if account.failed_logins < self.max_failures {
            return None;
        }

        let last_failed = account.last_failed_login?;
        let until = last_failed + self.window;

        (now < until).then_some(until)
    }

    /// Record a failed attempt and return the new consecutive count.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Storage operation failed
    pub async fn record_failure(&self, id: &AccountId) -> Result<u32, AccountError> {
        self.repository.record_login_failure(id, self.window).await
    }

    /// Record a successful login: counter to zero, window cleared.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Storage` - Storage operation failed
    pub async fn record_success(&self, id: &AccountId) -> Result<(), AccountError> {
        self.repository.record_login_success(id).await
    }

    /// Threshold at which an account becomes blocked.
    pub fn max_failures(&self) -> u32 {
        self.max_failures
    }
}
