//! Port for student persistence.

use async_trait::async_trait;

use crate::domain::{Student, StudentId};

use super::RepositoryError;

/// Student store. Students are never updated in place.
///
/// `insert` reports the first colliding unique key among
/// [`super::STUDENT_ID_NUMBER_KEY`], [`super::STUDENT_EMAIL_KEY`] and
/// [`super::STUDENT_INDEX_NUMBER_KEY`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn insert(&self, student: &Student) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError>;

    async fn delete(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError>;

    async fn list(&self) -> Result<Vec<Student>, RepositoryError>;
}
