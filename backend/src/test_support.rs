//! Test doubles shared by unit and integration tests.

mod clock;
mod mail;
mod memory;

pub use clock::MutableClock;
pub use mail::RecordingMailer;
pub use memory::{InMemoryBackend, TEST_CONTACT_INBOX, TEST_RESET_TTL_MINUTES, in_memory_ports};
