//! Port for university persistence.

use async_trait::async_trait;

use crate::domain::{CourseId, University, UniversityId};

use super::{Replaced, RepositoryError};

/// University store. Rows are listed in insertion order; names are unique
/// ignoring case ([`super::UNIVERSITY_NAME_KEY`]).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversityRepository: Send + Sync {
    async fn insert(&self, university: &University) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &UniversityId) -> Result<Option<University>, RepositoryError>;

    /// Overwrite name, location and establishment year of the university with
    /// the same id. The stored course list is kept. `None` when it is absent.
    async fn update(&self, university: &University) -> Result<Option<University>, RepositoryError>;

    /// Append `course_id` to the university's course list unless already
    /// present, in a single store operation. Returns the stored university,
    /// or `None` when it is absent.
    async fn attach_course(
        &self,
        id: &UniversityId,
        course_id: &CourseId,
    ) -> Result<Option<University>, RepositoryError>;

    async fn delete(&self, id: &UniversityId) -> Result<Option<University>, RepositoryError>;

    async fn list(&self) -> Result<Vec<University>, RepositoryError>;

    /// Drop every university and insert `universities` atomically, skipping
    /// name collisions within the batch.
    async fn replace_all(
        &self,
        universities: &[University],
    ) -> Result<Replaced<University>, RepositoryError>;
}
