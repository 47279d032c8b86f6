//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use chrono::Utc;

use crate::db::Store;
use crate::domain::{Account, PasswordPolicy, fingerprint};
use crate::services::account_service::{AccountError, AccountService};

pub struct SeaOrmAccountService {
    store: Store,
    password_ttl_secs: i64,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store, password_ttl_secs: i64) -> Self {
        Self {
            store,
            password_ttl_secs,
        }
    }
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn create_account(
        &self,
        login: &str,
        password: Option<&str>,
        is_external_account: bool,
    ) -> Result<Account, AccountError> {
        if self.store.get_account_by_login(login).await?.is_some() {
            return Err(AccountError::AlreadyExists);
        }

        if password.is_none() != is_external_account {
            return Err(AccountError::ExternalFlagMismatch);
        }

        let password_fingerprint = match password {
            Some(plain) => {
                // The policy row is read fresh on every call; there is no
                // cached copy to go stale.
                if !self.store.get_policy().await?.allows(plain) {
                    return Err(AccountError::WeakPassword);
                }
                Some(fingerprint(plain))
            }
            None => None,
        };

        let expires = Utc::now().timestamp() + self.password_ttl_secs;

        let account = self
            .store
            .insert_account(
                login,
                password_fingerprint.as_deref(),
                is_external_account,
                expires,
            )
            .await?;

        Ok(account)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.store.get_account_by_login(login).await?)
    }

    async fn list_logins(&self) -> Result<Vec<String>, AccountError> {
        Ok(self.store.list_account_logins().await?)
    }

    async fn change_password(
        &self,
        account: &Account,
        new_password: &str,
    ) -> Result<(), AccountError> {
        // Callers are expected to have checked already, but the guard
        // belongs here, not in the adapter.
        if account.is_external_account {
            return Err(AccountError::ExternalAccountImmutable);
        }

        if !self.store.get_policy().await?.allows(new_password) {
            return Err(AccountError::WeakPassword);
        }

        self.store
            .update_account_fingerprint(&account.login, &fingerprint(new_password))
            .await?;

        Ok(())
    }

    async fn delete_account(&self, login: &str) -> Result<(), AccountError> {
        Ok(self.store.delete_account(login).await?)
    }

    async fn set_policy(&self, policy: PasswordPolicy) -> Result<(), AccountError> {
        Ok(self.store.set_policy(&policy).await?)
    }
}
