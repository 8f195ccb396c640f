//! Driving port for university use-cases.

use async_trait::async_trait;

use crate::domain::{CourseId, Error, NewUniversity, University, UniversityId, UniversityPatch};

/// University operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniversityManagement: Send + Sync {
    /// Validate and store a university. Every listed course must exist.
    async fn create(&self, input: NewUniversity) -> Result<University, Error>;

    async fn get(&self, id: UniversityId) -> Result<University, Error>;

    async fn list(&self) -> Result<Vec<University>, Error>;

    async fn update(&self, id: UniversityId, patch: UniversityPatch) -> Result<University, Error>;

    async fn delete(&self, id: UniversityId) -> Result<University, Error>;

    /// Attach an existing course to the university. Attaching twice is a
    /// no-op that still returns the university.
    async fn add_course(
        &self,
        university_id: UniversityId,
        course_id: CourseId,
    ) -> Result<University, Error>;
}
