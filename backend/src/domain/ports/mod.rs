//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (repositories, hashing, mail) are implemented by outbound
//! adapters. Driving ports are implemented by domain services and called by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_repository;
mod application_command;
mod application_query;
mod application_repository;
mod catalogue_seeding;
mod contact_relay;
mod course_management;
mod course_repository;
mod mailer;
mod password_hasher;
mod repository;
mod student_directory;
mod student_repository;
mod university_management;
mod university_repository;

pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_repository::AccountRepository;
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use application_command::ApplicationCommand;
#[cfg(test)]
pub use application_command::MockApplicationCommand;
pub use application_query::ApplicationQuery;
#[cfg(test)]
pub use application_query::MockApplicationQuery;
pub use application_repository::ApplicationRepository;
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use catalogue_seeding::CatalogueSeeding;
#[cfg(test)]
pub use catalogue_seeding::MockCatalogueSeeding;
pub use contact_relay::ContactRelay;
#[cfg(test)]
pub use contact_relay::MockContactRelay;
pub use course_management::CourseManagement;
#[cfg(test)]
pub use course_management::MockCourseManagement;
pub use course_repository::CourseRepository;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{Mailer, MailerError, OutgoingMail};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use repository::{
    ACCOUNT_LOGIN_KEY, ACCOUNT_PHONE_KEY, APPLICATION_STUDENT_COURSE_KEY, COURSE_NAME_KEY,
    Replaced, RepositoryError, STUDENT_EMAIL_KEY, STUDENT_ID_NUMBER_KEY, STUDENT_INDEX_NUMBER_KEY,
    UNIVERSITY_NAME_KEY, constrained_field,
};
#[cfg(test)]
pub use student_directory::MockStudentDirectory;
pub use student_directory::StudentDirectory;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::StudentRepository;
#[cfg(test)]
pub use university_management::MockUniversityManagement;
pub use university_management::UniversityManagement;
#[cfg(test)]
pub use university_repository::MockUniversityRepository;
pub use university_repository::UniversityRepository;

use std::sync::Arc;

/// Bundle of driven repository ports, built once per store backing.
#[derive(Clone)]
pub struct RepositoryPorts {
    pub courses: Arc<dyn CourseRepository>,
    pub universities: Arc<dyn UniversityRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub accounts: Arc<dyn AccountRepository>,
}
