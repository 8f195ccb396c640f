//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{Account, AccountId};

use super::RepositoryError;

/// Account store. Logins ([`super::ACCOUNT_LOGIN_KEY`]) and phone numbers
/// ([`super::ACCOUNT_PHONE_KEY`]) are unique.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn insert(&self, account: &Account) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError>;

    /// Look up an account by its normalised login.
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, RepositoryError>;

    /// Look up the account holding an outstanding reset with this digest.
    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, RepositoryError>;

    /// Persist password and reset-state changes. `None` when absent.
    async fn update(&self, account: &Account) -> Result<Option<Account>, RepositoryError>;
}
