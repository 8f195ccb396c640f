//! In-memory backend wiring for integration tests.

use std::sync::Arc;

use chrono::TimeDelta;

use crate::domain::ports::RepositoryPorts;
use crate::inbound::http::state::{HttpState, HttpStatePorts, ServiceAdapters};
use crate::outbound::memory::MemoryStore;
use crate::outbound::security::BcryptPasswordHasher;

use super::{MutableClock, RecordingMailer};

/// Inbox the contact relay writes to.
pub const TEST_CONTACT_INBOX: &str = "admissions@test.local";
/// Reset token lifetime used by [`InMemoryBackend`].
pub const TEST_RESET_TTL_MINUTES: i64 = 30;

/// Fresh, empty in-memory stores behind every repository port.
pub fn in_memory_ports() -> RepositoryPorts {
    MemoryStore::default().into_ports()
}

/// Every domain service over empty memory stores, with the mailer and clock
/// kept for assertions.
pub struct InMemoryBackend {
    pub repositories: RepositoryPorts,
    pub mailer: Arc<RecordingMailer>,
    pub clock: Arc<MutableClock>,
    pub state: HttpState,
}

impl InMemoryBackend {
    pub fn new(seeding_enabled: bool) -> Self {
        let repositories = in_memory_ports();
        let mailer = Arc::new(RecordingMailer::default());
        let clock = Arc::new(MutableClock::fixed());
        let adapters = ServiceAdapters {
            hasher: Arc::new(BcryptPasswordHasher::with_cost(4)),
            mailer: mailer.clone(),
            clock: clock.clone(),
            contact_inbox: TEST_CONTACT_INBOX.to_owned(),
            password_reset_ttl: TimeDelta::minutes(TEST_RESET_TTL_MINUTES),
        };
        let ports = HttpStatePorts::from_repositories(&repositories, adapters);
        Self {
            repositories,
            mailer,
            clock,
            state: HttpState::new(ports).with_seeding(seeding_enabled),
        }
    }
}
