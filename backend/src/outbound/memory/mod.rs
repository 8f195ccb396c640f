//! In-memory repository adapters.
//!
//! Used when no database is configured and by tests. Each table is a vector
//! behind a mutex; uniqueness checks and writes happen under one lock
//! acquisition, which makes every insert atomic with respect to its unique
//! keys. Rows keep insertion order.

mod accounts;
mod applications;
mod catalogue;
mod students;
mod table;

use std::sync::Arc;

use crate::domain::ports::RepositoryPorts;

pub use accounts::MemoryAccountRepository;
pub use applications::MemoryApplicationRepository;
pub use catalogue::{MemoryCourseRepository, MemoryUniversityRepository};
pub use students::MemoryStudentRepository;

/// A full set of empty in-memory repositories.
#[derive(Default)]
pub struct MemoryStore {
    pub courses: MemoryCourseRepository,
    pub universities: MemoryUniversityRepository,
    pub students: MemoryStudentRepository,
    pub applications: MemoryApplicationRepository,
    pub accounts: MemoryAccountRepository,
}

impl MemoryStore {
    pub fn into_ports(self) -> RepositoryPorts {
        RepositoryPorts {
            courses: Arc::new(self.courses),
            universities: Arc::new(self.universities),
            students: Arc::new(self.students),
            applications: Arc::new(self.applications),
            accounts: Arc::new(self.accounts),
        }
    }
}
