//! Account sign-up, authentication and password-reset service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use mockable::Clock;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use super::ports::{
    AccountCommand, AccountRepository, Mailer, OutgoingMail, PasswordHashError, PasswordHasher,
};
use super::repository_errors::map_repository_error;
use super::{
    Account, AccountId, Error, LoginCredentials, LoginKind, NewAccount, PasswordReset,
    PasswordResetConfirmation, Signup, normalise_login,
};

const RESET_TOKEN_BYTES: usize = 32;

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn hashing_failed(err: &PasswordHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal("password hashing failed")
}

fn invalid_reset_token() -> Error {
    Error::invalid_request("reset token is invalid or expired")
}

/// Hex SHA-256 digest under which a reset token is stored.
pub(crate) fn reset_token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn generate_reset_token() -> String {
    let mut bytes = [0_u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Implements [`AccountCommand`].
#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<dyn PasswordHasher>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    reset_ttl: TimeDelta,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<dyn PasswordHasher>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        reset_ttl: TimeDelta,
    ) -> Self {
        Self {
            accounts,
            hasher,
            mailer,
            clock,
            reset_ttl,
        }
    }

    async fn notify(&self, mail: OutgoingMail, account_id: AccountId) {
        if let Err(err) = self.mailer.send(&mail).await {
            warn!(%account_id, subject = %mail.subject, error = %err, "account email not sent");
        }
    }

    async fn save(&self, account: &Account) -> Result<(), Error> {
        self.accounts
            .update(account)
            .await
            .map_err(|err| map_repository_error("account", err))?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("account {} not found", account.id)))
    }
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn sign_up(&self, input: NewAccount) -> Result<Account, Error> {
        let signup = Signup::try_from_input(&input)?;
        let password_hash = self
            .hasher
            .hash(signup.password())
            .map_err(|err| hashing_failed(&err))?;
        let account = Account {
            id: AccountId::random(),
            login: signup.login().to_owned(),
            login_kind: signup.login_kind(),
            phone: signup.phone().to_owned(),
            password_hash,
            created_at: self.clock.utc(),
            password_reset: None,
        };
        self.accounts
            .insert(&account)
            .await
            .map_err(|err| map_repository_error("account", err))?;
        info!(account_id = %account.id, kind = account.login_kind.as_str(), "account created");

        if let Some(email) = account.email() {
            let mail = OutgoingMail {
                to: email.to_owned(),
                subject: "Welcome to admissions".to_owned(),
                body: format!("Your account {} is ready.", account.login),
            };
            self.notify(mail, account.id).await;
        }
        Ok(account)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccountId, Error> {
        let account = self
            .accounts
            .find_by_login(credentials.login())
            .await
            .map_err(|err| map_repository_error("account", err))?
            .ok_or_else(invalid_credentials)?;

        match self
            .hasher
            .verify(credentials.password(), &account.password_hash)
        {
            Ok(true) => Ok(account.id),
            Ok(false) => Err(invalid_credentials()),
            Err(err) => {
                error!(account_id = %account.id, error = %err, "stored password hash unusable");
                Err(Error::internal("password verification failed"))
            }
        }
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), Error> {
        let (login, kind) = normalise_login(email);
        if kind != LoginKind::Email {
            return Ok(());
        }
        let Some(mut account) = self
            .accounts
            .find_by_login(&login)
            .await
            .map_err(|err| map_repository_error("account", err))?
        else {
            info!("password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_reset_token();
        account.password_reset = Some(PasswordReset {
            token_hash: reset_token_digest(&token),
            expires_at: self.clock.utc() + self.reset_ttl,
        });
        self.save(&account).await?;
        info!(account_id = %account.id, "password reset issued");

        let mail = OutgoingMail {
            to: login,
            subject: "Password reset".to_owned(),
            body: format!(
                "Use this token to reset your password: {token}\n\nIt expires in {} minutes.",
                self.reset_ttl.num_minutes()
            ),
        };
        self.notify(mail, account.id).await;
        Ok(())
    }

    async fn confirm_password_reset(
        &self,
        confirmation: PasswordResetConfirmation,
    ) -> Result<(), Error> {
        let mut account = self
            .accounts
            .find_by_reset_token_hash(&reset_token_digest(confirmation.token()))
            .await
            .map_err(|err| map_repository_error("account", err))?
            .ok_or_else(invalid_reset_token)?;

        let expired = account
            .password_reset
            .as_ref()
            .is_none_or(|reset| reset.expires_at <= self.clock.utc());
        if expired {
            return Err(invalid_reset_token());
        }

        account.password_hash = self
            .hasher
            .hash(confirmation.new_password())
            .map_err(|err| hashing_failed(&err))?;
        account.password_reset = None;
        self.save(&account).await?;
        info!(account_id = %account.id, "password reset completed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
