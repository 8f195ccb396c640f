//! Driving port for course use-cases.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, CoursePatch, Error, NewCourse};

/// Course catalogue operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseManagement: Send + Sync {
    /// Validate and store a new course. Fails with `conflict` when the name
    /// is taken, ignoring case.
    async fn create(&self, input: NewCourse) -> Result<Course, Error>;

    async fn get(&self, id: CourseId) -> Result<Course, Error>;

    async fn list(&self) -> Result<Vec<Course>, Error>;

    /// Apply a partial update and refresh `updated_at`.
    async fn update(&self, id: CourseId, patch: CoursePatch) -> Result<Course, Error>;

    /// Delete a course and return it. Applications that reference it are
    /// left in place.
    async fn delete(&self, id: CourseId) -> Result<Course, Error>;

    /// `"name: description"` for the course.
    async fn summary(&self, id: CourseId) -> Result<String, Error>;
}
