//! Driving port for student registration.

use async_trait::async_trait;

use crate::domain::{Error, NewStudent, Student, StudentId};

/// Student operations exposed to inbound adapters. There is no update.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// Validate and register a student. Fails with `conflict` naming the
    /// field when the id number, email or index number is taken.
    async fn register(&self, input: NewStudent) -> Result<Student, Error>;

    async fn get(&self, id: StudentId) -> Result<Student, Error>;

    async fn list(&self) -> Result<Vec<Student>, Error>;

    async fn delete(&self, id: StudentId) -> Result<Student, Error>;
}
