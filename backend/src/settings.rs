//! Application settings loaded via OrthoConfig.
//!
//! Values come from `ADMISSIONS_*` environment variables, an optional config
//! file, and command-line flags. Unset values fall back to the defaults below.

use std::net::{AddrParseError, SocketAddr};

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CONTACT_INBOX: &str = "admissions@localhost";
const DEFAULT_MAIL_SENDER: &str = "no-reply@localhost";
const DEFAULT_RESET_TTL_MINUTES: u32 = 60;

/// Runtime configuration for the admissions server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMISSIONS")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Allow signed-in operators to reset the catalogue to sample data.
    #[ortho_config(default = false)]
    pub seeding_enabled: bool,
    /// Recipient of contact form messages.
    pub contact_inbox: Option<String>,
    /// Sender address on outgoing mail.
    pub mail_sender: Option<String>,
    /// Lifetime of a password reset token.
    pub password_reset_ttl_minutes: Option<u32>,
}

impl AppSettings {
    /// Parsed listener address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn contact_inbox(&self) -> &str {
        self.contact_inbox.as_deref().unwrap_or(DEFAULT_CONTACT_INBOX)
    }

    pub fn mail_sender(&self) -> &str {
        self.mail_sender.as_deref().unwrap_or(DEFAULT_MAIL_SENDER)
    }

    pub fn password_reset_ttl(&self) -> TimeDelta {
        let minutes = self
            .password_reset_ttl_minutes
            .unwrap_or(DEFAULT_RESET_TTL_MINUTES);
        TimeDelta::minutes(i64::from(minutes))
    }
}

#[cfg(test)]
mod tests {
    //! Settings loading from the environment.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "ADMISSIONS_BIND_ADDR",
        "ADMISSIONS_DATABASE_URL",
        "ADMISSIONS_SEEDING_ENABLED",
        "ADMISSIONS_CONTACT_INBOX",
        "ADMISSIONS_MAIL_SENDER",
        "ADMISSIONS_PASSWORD_RESET_TTL_MINUTES",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("admissions")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.database_url().is_none());
        assert!(!settings.seeding_enabled);
        assert_eq!(settings.contact_inbox(), DEFAULT_CONTACT_INBOX);
        assert_eq!(settings.mail_sender(), DEFAULT_MAIL_SENDER);
        assert_eq!(settings.password_reset_ttl(), TimeDelta::minutes(60));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ADMISSIONS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "ADMISSIONS_DATABASE_URL",
                Some("postgres://localhost/admissions".to_owned()),
            ),
            ("ADMISSIONS_SEEDING_ENABLED", Some("true".to_owned())),
            ("ADMISSIONS_CONTACT_INBOX", Some("desk@example.ac.ke".to_owned())),
            ("ADMISSIONS_MAIL_SENDER", Some("noreply@example.ac.ke".to_owned())),
            ("ADMISSIONS_PASSWORD_RESET_TTL_MINUTES", Some("15".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9000
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://localhost/admissions")
        );
        assert!(settings.seeding_enabled);
        assert_eq!(settings.contact_inbox(), "desk@example.ac.ke");
        assert_eq!(settings.mail_sender(), "noreply@example.ac.ke");
        assert_eq!(settings.password_reset_ttl(), TimeDelta::minutes(15));
    }

    #[rstest]
    fn blank_database_url_selects_memory_store() {
        let mut settings = {
            let _guard = lock_env(VARS.map(|name| (name, None::<String>)));
            load_from_empty_args()
        };
        settings.database_url = Some("  ".to_owned());
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([("ADMISSIONS_BIND_ADDR", Some("not-an-address".to_owned()))]);

        let settings = load_from_empty_args();
        assert!(settings.bind_addr().is_err());
    }
}
