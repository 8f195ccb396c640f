//! Driving port for account sign-up, authentication and password resets.

use async_trait::async_trait;

use crate::domain::{
    Account, AccountId, Error, LoginCredentials, NewAccount, PasswordResetConfirmation,
};

/// Account operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register an account. Fails with `conflict` when the login or phone is
    /// already registered.
    async fn sign_up(&self, input: NewAccount) -> Result<Account, Error>;

    /// Verify credentials. Unknown logins and wrong passwords both fail with
    /// the same `unauthorized` error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccountId, Error>;

    /// Email a reset token when `email` belongs to an account. Succeeds
    /// either way so callers cannot probe for registered addresses.
    async fn request_password_reset(&self, email: &str) -> Result<(), Error>;

    /// Replace the password for the account holding the token.
    async fn confirm_password_reset(
        &self,
        confirmation: PasswordResetConfirmation,
    ) -> Result<(), Error>;
}
