use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;

/// In-memory account store keyed by account id.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AccountId, Account>>, AccountError> {
        self.accounts
            .lock()
            .map_err(|e| AccountError::Storage(e.to_string()))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.lock()?;
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let accounts = self.lock()?;
        Ok(accounts.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let accounts = self.lock()?;
        Ok(accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.lock()?;

        if !accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        let mut account = account;
        account.updated_at = Utc::now();
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn record_login_failure(
        &self,
        id: &AccountId,
        window: Duration,
    ) -> Result<u32, AccountError> {
        let mut accounts = self.lock()?;

        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        let now = Utc::now();
        // A failure outside the window restarts the count instead of
        // accumulating against a stale counter.
        let within_window = account
            .last_failed_login
            .is_some_and(|last| now - last < window);

        account.failed_logins = if within_window {
            account.failed_logins.saturating_add(1)
        } else {
            1
        };
        account.last_failed_login = Some(now);
        account.updated_at = now;

        Ok(account.failed_logins)
    }

    async fn record_login_success(&self, id: &AccountId) -> Result<(), AccountError> {
        let mut accounts = self.lock()?;

        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        let now = Utc::now();
        account.failed_logins = 0;
        account.last_failed_login = None;
        account.last_successful_login = Some(now);
        account.updated_at = now;

        Ok(())
    }

    async fn update_password(
        &self,
        id: &AccountId,
        password_hash: String,
    ) -> Result<(), AccountError> {
        let mut accounts = self.lock()?;

        let account = accounts
            .get_mut(id)
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        account.password_hash = password_hash;
        account.updated_at = Utc::now();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::models::Role;

    async fn seeded_account(repo: &InMemoryAccountRepository) -> Account {
        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        let account = Account::new("Ada".to_string(), email, "hash".to_string(), Role::User);
        repo.insert(account).await.unwrap()
    }

    #[tokio::test]
    async fn test_find_by_email_matches_normalized_address() {
        let repo = InMemoryAccountRepository::new();
        let email = EmailAddress::new("Ada@X.Com".to_string()).unwrap();
        let account = Account::new("Ada".to_string(), email, "hash".to_string(), Role::User);
        repo.insert(account.clone()).await.unwrap();

        let lookup = EmailAddress::new("ada@x.com".to_string()).unwrap();
        let found = repo.find_by_email(&lookup).await.unwrap();
        assert_eq!(found.unwrap().id, account.id);
    }

    #[tokio::test]
    async fn test_failure_counter_increments_within_window() {
        let repo = InMemoryAccountRepository::new();
        let account = seeded_account(&repo).await;
        let window = Duration::minutes(15);

        assert_eq!(repo.record_login_failure(&account.id, window).await.unwrap(), 1);
        assert_eq!(repo.record_login_failure(&account.id, window).await.unwrap(), 2);
        assert_eq!(repo.record_login_failure(&account.id, window).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_stale_failure_restarts_counter() {
        let repo = InMemoryAccountRepository::new();
        let account = seeded_account(&repo).await;
        let window = Duration::minutes(15);

        repo.record_login_failure(&account.id, window).await.unwrap();
        repo.record_login_failure(&account.id, window).await.unwrap();

        // Backdate the anchor beyond the window.
        let mut stored = repo.find_by_id(&account.id).await.unwrap().unwrap();
        stored.last_failed_login = Some(Utc::now() - Duration::minutes(20));
        repo.update(stored).await.unwrap();

        assert_eq!(repo.record_login_failure(&account.id, window).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_success_clears_counter_and_anchor() {
        let repo = InMemoryAccountRepository::new();
        let account = seeded_account(&repo).await;
        let window = Duration::minutes(15);

        repo.record_login_failure(&account.id, window).await.unwrap();
        repo.record_login_success(&account.id).await.unwrap();

        let stored = repo.find_by_id(&account.id).await.unwrap().unwrap();
        assert_eq!(stored.failed_logins, 0);
        assert!(stored.last_failed_login.is_none());
        assert!(stored.last_successful_login.is_some());
    }

    #[tokio::test]
    async fn test_update_password_on_missing_account() {
        let repo = InMemoryAccountRepository::new();
        let result = repo
            .update_password(&AccountId::new(), "hash".to_string())
            .await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }
}
