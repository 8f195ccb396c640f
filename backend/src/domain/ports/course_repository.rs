//! Port for course persistence.

use async_trait::async_trait;

use crate::domain::{Course, CourseId};

use super::{Replaced, RepositoryError};

/// Course store. Rows are listed in insertion order.
///
/// `insert` and `update` fail with [`RepositoryError::Duplicate`] carrying
/// [`super::COURSE_NAME_KEY`] when another course already uses the name,
/// ignoring case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn insert(&self, course: &Course) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError>;

    /// Replace the stored course with the same id. `None` when it is absent.
    async fn update(&self, course: &Course) -> Result<Option<Course>, RepositoryError>;

    /// Remove a course and return what was removed.
    async fn delete(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError>;

    async fn list(&self) -> Result<Vec<Course>, RepositoryError>;

    /// Drop every course and insert `courses` as one atomic step. Courses
    /// whose name collides with an earlier one in the batch are skipped. On
    /// failure the previous catalogue is left untouched.
    async fn replace_all(&self, courses: &[Course]) -> Result<Replaced<Course>, RepositoryError>;
}
