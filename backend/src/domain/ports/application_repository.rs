//! Port for application persistence.

use async_trait::async_trait;

use crate::domain::{Application, ApplicationFilter, ApplicationId, Page};

use super::RepositoryError;

/// Application store.
///
/// `insert` is the atomic duplicate guard: it must check for an existing
/// application with the same student and course and write the new row as one
/// step, failing with [`RepositoryError::Duplicate`] carrying
/// [`super::APPLICATION_STUDENT_COURSE_KEY`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert(&self, application: &Application) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &ApplicationId)
    -> Result<Option<Application>, RepositoryError>;

    async fn delete(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;

    /// Matching applications in creation order, windowed by `page`.
    async fn list(
        &self,
        filter: &ApplicationFilter,
        page: &Page,
    ) -> Result<Vec<Application>, RepositoryError>;
}
