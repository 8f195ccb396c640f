//! Builders wiring repositories and adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use admissions::domain::ports::RepositoryPorts;
use admissions::inbound::http::state::{HttpState, HttpStatePorts, ServiceAdapters};
use admissions::outbound::mail::TracingMailer;
use admissions::outbound::memory::MemoryStore;
use admissions::outbound::persistence::diesel_ports;
use admissions::outbound::security::BcryptPasswordHasher;

use super::ServerConfig;

/// Pick Diesel repositories when a pool is configured, otherwise memory.
fn repository_ports(config: &ServerConfig) -> RepositoryPorts {
    match &config.db_pool {
        Some(pool) => diesel_ports(pool),
        None => {
            info!("no database configured; using the in-memory store");
            MemoryStore::default().into_ports()
        }
    }
}

/// Construct the shared HTTP state from server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repos = repository_ports(config);
    let services = &config.services;
    let adapters = ServiceAdapters {
        hasher: Arc::new(BcryptPasswordHasher::default()),
        mailer: Arc::new(TracingMailer::new(services.mail_sender.clone())),
        clock: Arc::new(DefaultClock),
        contact_inbox: services.contact_inbox.clone(),
        password_reset_ttl: services.password_reset_ttl,
    };
    let ports = HttpStatePorts::from_repositories(&repos, adapters);
    web::Data::new(HttpState::new(ports).with_seeding(services.seeding_enabled))
}
