//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Unique indexes carry the constraint names declared
//! in [`crate::domain::ports`], so violations surface as
//! [`crate::domain::ports::RepositoryError::Duplicate`].
//!
//! # Example
//!
//! ```no_run
//! use admissions::outbound::persistence::{DbPool, PoolConfig, diesel_ports};
//!
//! # async fn example() -> Result<(), admissions::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/admissions")).await?;
//! let ports = diesel_ports(&pool);
//! # let _ = ports;
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_application_repository;
mod diesel_course_repository;
mod diesel_student_repository;
mod diesel_university_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

use std::sync::Arc;

use crate::domain::ports::RepositoryPorts;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_university_repository::DieselUniversityRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

/// Diesel repositories for every port, sharing one pool.
pub fn diesel_ports(pool: &DbPool) -> RepositoryPorts {
    RepositoryPorts {
        courses: Arc::new(DieselCourseRepository::new(pool.clone())),
        universities: Arc::new(DieselUniversityRepository::new(pool.clone())),
        students: Arc::new(DieselStudentRepository::new(pool.clone())),
        applications: Arc::new(DieselApplicationRepository::new(pool.clone())),
        accounts: Arc::new(DieselAccountRepository::new(pool.clone())),
    }
}
