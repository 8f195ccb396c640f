//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use chrono::TimeDelta;
use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, ApplicationCommand, ApplicationQuery, CatalogueSeeding, ContactRelay,
    CourseManagement, Mailer, PasswordHasher, RepositoryPorts, StudentDirectory,
    UniversityManagement,
};
use crate::domain::{
    AccountService, ApplicationQueryService, ApplicationWorkflowPorts, ApplicationWorkflowService,
    ContactService, CourseService, SeedingService, StudentService, UniversityService,
};

/// Parameter object bundling the driving ports used by handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub courses: Arc<dyn CourseManagement>,
    pub universities: Arc<dyn UniversityManagement>,
    pub students: Arc<dyn StudentDirectory>,
    pub applications: Arc<dyn ApplicationCommand>,
    pub applications_query: Arc<dyn ApplicationQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub contact: Arc<dyn ContactRelay>,
    pub seeding: Arc<dyn CatalogueSeeding>,
}

/// Non-repository collaborators shared by the domain services.
pub struct ServiceAdapters {
    pub hasher: Arc<dyn PasswordHasher>,
    pub mailer: Arc<dyn Mailer>,
    pub clock: Arc<dyn Clock>,
    /// Recipient of relayed contact messages.
    pub contact_inbox: String,
    pub password_reset_ttl: TimeDelta,
}

impl HttpStatePorts {
    /// Build every domain service over `repos`.
    pub fn from_repositories(repos: &RepositoryPorts, adapters: ServiceAdapters) -> Self {
        let ServiceAdapters {
            hasher,
            mailer,
            clock,
            contact_inbox,
            password_reset_ttl,
        } = adapters;
        let workflow = ApplicationWorkflowPorts::from(repos);

        Self {
            courses: Arc::new(CourseService::new(
                Arc::clone(&repos.courses),
                Arc::clone(&clock),
            )),
            universities: Arc::new(UniversityService::new(
                Arc::clone(&repos.universities),
                Arc::clone(&repos.courses),
                Arc::clone(&clock),
            )),
            students: Arc::new(StudentService::new(
                Arc::clone(&repos.students),
                Arc::clone(&clock),
            )),
            applications: Arc::new(ApplicationWorkflowService::new(
                workflow.clone(),
                Arc::clone(&mailer),
                Arc::clone(&clock),
            )),
            applications_query: Arc::new(ApplicationQueryService::new(workflow)),
            accounts: Arc::new(AccountService::new(
                Arc::clone(&repos.accounts),
                hasher,
                Arc::clone(&mailer),
                Arc::clone(&clock),
                password_reset_ttl,
            )),
            contact: Arc::new(ContactService::new(mailer, contact_inbox)),
            seeding: Arc::new(SeedingService::new(
                Arc::clone(&repos.courses),
                Arc::clone(&repos.universities),
                clock,
            )),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub courses: Arc<dyn CourseManagement>,
    pub universities: Arc<dyn UniversityManagement>,
    pub students: Arc<dyn StudentDirectory>,
    pub applications: Arc<dyn ApplicationCommand>,
    pub applications_query: Arc<dyn ApplicationQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub contact: Arc<dyn ContactRelay>,
    pub seeding: Arc<dyn CatalogueSeeding>,
    /// Whether the admin seeding endpoints may run.
    pub seeding_enabled: bool,
}

impl HttpState {
    /// Construct state with seeding disabled.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            courses,
            universities,
            students,
            applications,
            applications_query,
            accounts,
            contact,
            seeding,
        } = ports;
        Self {
            courses,
            universities,
            students,
            applications,
            applications_query,
            accounts,
            contact,
            seeding,
            seeding_enabled: false,
        }
    }

    /// Toggle the admin seeding endpoints.
    #[must_use]
    pub fn with_seeding(mut self, enabled: bool) -> Self {
        self.seeding_enabled = enabled;
        self
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
