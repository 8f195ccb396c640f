//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use admissions::outbound::persistence::DbPool;
use admissions::settings::AppSettings;
use chrono::TimeDelta;

/// Settings consumed by the domain services rather than the listener.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub(crate) seeding_enabled: bool,
    pub(crate) contact_inbox: String,
    pub(crate) mail_sender: String,
    pub(crate) password_reset_ttl: TimeDelta,
}

impl From<&AppSettings> for ServiceSettings {
    fn from(settings: &AppSettings) -> Self {
        Self {
            seeding_enabled: settings.seeding_enabled,
            contact_inbox: settings.contact_inbox().to_owned(),
            mail_sender: settings.mail_sender().to_owned(),
            password_reset_ttl: settings.password_reset_ttl(),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) services: ServiceSettings,
}

impl ServerConfig {
    /// Construct a server configuration from session and service settings.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        services: ServiceSettings,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            services,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one every repository is served from memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
