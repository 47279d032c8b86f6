//! Domain service for account lifecycle and password policy.
//!
//! Handles creation, lookup, password changes, deletion, and the singleton
//! password-strength policy. Callers decide what each error means on the
//! wire; nothing here knows about HTTP.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Account, PasswordPolicy};

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account already exists")]
    AlreadyExists,

    #[error("password does not satisfy the current policy")]
    WeakPassword,

    #[error("password must be null exactly for external accounts")]
    ExternalFlagMismatch,

    #[error("external accounts store no password to change")]
    ExternalAccountImmutable,

    #[error("database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for account management.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Creates and stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::AlreadyExists`] if the login is taken,
    /// [`AccountError::ExternalFlagMismatch`] unless the password is
    /// absent exactly when the account is external, and
    /// [`AccountError::WeakPassword`] if a local password fails the
    /// current policy.
    async fn create_account(
        &self,
        login: &str,
        password: Option<&str>,
        is_external_account: bool,
    ) -> Result<Account, AccountError>;

    /// Pure lookup; absence is not an error.
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, AccountError>;

    /// Every stored login, in no guaranteed order.
    async fn list_logins(&self) -> Result<Vec<String>, AccountError>;

    /// Overwrites the stored fingerprint after evaluating the current
    /// policy. The account's `expires` value is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::ExternalAccountImmutable`] for external
    /// accounts and [`AccountError::WeakPassword`] if the new password
    /// fails the current policy.
    async fn change_password(
        &self,
        account: &Account,
        new_password: &str,
    ) -> Result<(), AccountError>;

    /// Removes the stored row; deleting an absent login is a no-op here.
    async fn delete_account(&self, login: &str) -> Result<(), AccountError>;

    /// Replaces the singleton policy wholesale. Already-stored
    /// fingerprints are unaffected.
    async fn set_policy(&self, policy: PasswordPolicy) -> Result<(), AccountError>;
}
