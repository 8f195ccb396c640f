//! Account store.

use async_trait::async_trait;

use crate::domain::ports::{
    ACCOUNT_LOGIN_KEY, ACCOUNT_PHONE_KEY, AccountRepository, RepositoryError,
};
use crate::domain::{Account, AccountId};

use super::table::Table;

#[derive(Debug, Default)]
pub struct MemoryAccountRepository {
    rows: Table<Account>,
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock()?;
        for row in rows.iter() {
            if row.login == account.login {
                return Err(RepositoryError::duplicate(ACCOUNT_LOGIN_KEY));
            }
            if row.phone == account.phone {
                return Err(RepositoryError::duplicate(ACCOUNT_PHONE_KEY));
            }
        }
        rows.push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        self.rows.find(|row| row.id == *id)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, RepositoryError> {
        self.rows.find(|row| row.login == login)
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        self.rows.find(|row| {
            row.password_reset
                .as_ref()
                .is_some_and(|reset| reset.token_hash == token_hash)
        })
    }

    async fn update(&self, account: &Account) -> Result<Option<Account>, RepositoryError> {
        let mut rows = self.rows.lock()?;
        Ok(rows.iter_mut().find(|row| row.id == account.id).map(|row| {
            *row = account.clone();
            row.clone()
        }))
    }
}
