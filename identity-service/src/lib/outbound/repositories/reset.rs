use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::reset::errors::ResetTokenError;
use crate::domain::reset::models::PasswordResetToken;
use crate::domain::reset::ports::ConsumeClaim;
use crate::domain::reset::ports::ResetTokenRepository;

/// In-memory reset token store keyed by the opaque token value.
#[derive(Default)]
pub struct InMemoryResetTokenRepository {
    tokens: Mutex<HashMap<String, PasswordResetToken>>,
}

impl InMemoryResetTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<String, PasswordResetToken>>, ResetTokenError> {
        self.tokens
            .lock()
            .map_err(|e| ResetTokenError::Storage(e.to_string()))
    }
}

#[async_trait]
impl ResetTokenRepository for InMemoryResetTokenRepository {
    async fn insert(
        &self,
        token: PasswordResetToken,
    ) -> Result<PasswordResetToken, ResetTokenError> {
        let mut tokens = self.lock()?;
        tokens.insert(token.value.clone(), token.clone());
        Ok(token)
    }

    async fn find_by_value(
        &self,
        value: &str,
    ) -> Result<Option<PasswordResetToken>, ResetTokenError> {
        let tokens = self.lock()?;
        Ok(tokens.get(value).cloned())
    }

    async fn consume(&self, value: &str) -> Result<ConsumeClaim, ResetTokenError> {
        // Single lock acquisition: of two racing consumes exactly one
        // sees the token unconsumed.
        let mut tokens = self.lock()?;

        let Some(token) = tokens.get_mut(value) else {
            return Ok(ConsumeClaim::Missing);
        };

        if token.consumed {
            return Ok(ConsumeClaim::AlreadyUsed);
        }

        if token.is_expired(Utc::now()) {
            return Ok(ConsumeClaim::Expired);
        }

        token.consumed = true;
        Ok(ConsumeClaim::Consumed(token.clone()))
    }

    async fn invalidate_all_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<u64, ResetTokenError> {
        let mut tokens = self.lock()?;

        let mut invalidated = 0;
        for token in tokens.values_mut() {
            if token.account_id == *account_id && !token.consumed {
                token.consumed = true;
                invalidated += 1;
            }
        }

        Ok(invalidated)
    }
}
