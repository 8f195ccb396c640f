//! PostgreSQL-backed `AccountRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRepository, RepositoryError};
use crate::domain::{Account, AccountId, LoginKind, PasswordReset};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{AccountCredentialsUpdate, AccountRow};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_account(row: AccountRow) -> Result<Account, RepositoryError> {
    let login_kind = LoginKind::parse(&row.login_kind)
        .ok_or_else(|| corrupt_row("account", format!("login kind {:?}", row.login_kind)))?;
    let password_reset = match (row.reset_token_hash, row.reset_expires_at) {
        (Some(token_hash), Some(expires_at)) => Some(PasswordReset {
            token_hash,
            expires_at,
        }),
        (None, None) => None,
        _ => return Err(corrupt_row("account", "partial password reset")),
    };
    Ok(Account {
        id: AccountId::from_uuid(row.id),
        login: row.login,
        login_kind,
        phone: row.phone,
        password_hash: row.password_hash,
        created_at: row.created_at,
        password_reset,
    })
}

fn account_to_row(account: &Account) -> AccountRow {
    AccountRow {
        id: *account.id.as_uuid(),
        login: account.login.clone(),
        login_kind: account.login_kind.as_str().to_owned(),
        phone: account.phone.clone(),
        password_hash: account.password_hash.clone(),
        reset_token_hash: account
            .password_reset
            .as_ref()
            .map(|reset| reset.token_hash.clone()),
        reset_expires_at: account.password_reset.as_ref().map(|reset| reset.expires_at),
        created_at: account.created_at,
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(accounts::table)
            .values(&account_to_row(account))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = accounts::table
            .find(id.as_uuid())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = accounts::table
            .filter(accounts::login.eq(login))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = accounts::table
            .filter(accounts::reset_token_hash.eq(token_hash))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn update(&self, account: &Account) -> Result<Option<Account>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let reset = account.password_reset.as_ref();
        let changes = AccountCredentialsUpdate {
            password_hash: &account.password_hash,
            reset_token_hash: reset.map(|reset| reset.token_hash.as_str()),
            reset_expires_at: reset.map(|reset| reset.expires_at),
        };
        let row = diesel::update(accounts::table.find(account.id.as_uuid()))
            .set(&changes)
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }
}
