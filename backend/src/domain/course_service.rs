//! Course catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{CourseManagement, CourseRepository};
use super::repository_errors::{entity_not_found, map_repository_error};
use super::{Course, CourseId, CoursePatch, Error, NewCourse};

fn not_found(id: CourseId) -> Error {
    entity_not_found("course", id)
}

/// Implements [`CourseManagement`] over a [`CourseRepository`].
#[derive(Clone)]
pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    clock: Arc<dyn Clock>,
}

impl CourseService {
    pub fn new(courses: Arc<dyn CourseRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { courses, clock }
    }

    async fn load(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error("course", err))?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl CourseManagement for CourseService {
    async fn create(&self, input: NewCourse) -> Result<Course, Error> {
        let course = Course::create(&input, CourseId::random(), self.clock.utc())?;
        self.courses
            .insert(&course)
            .await
            .map_err(|err| map_repository_error("course", err))?;
        info!(course_id = %course.id, name = %course.name, "course created");
        Ok(course)
    }

    async fn get(&self, id: CourseId) -> Result<Course, Error> {
        self.load(id).await
    }

    async fn list(&self) -> Result<Vec<Course>, Error> {
        self.courses
            .list()
            .await
            .map_err(|err| map_repository_error("course", err))
    }

    async fn update(&self, id: CourseId, patch: CoursePatch) -> Result<Course, Error> {
        let current = self.load(id).await?;
        let updated = current.apply(&patch, self.clock.utc())?;
        self.courses
            .update(&updated)
            .await
            .map_err(|err| map_repository_error("course", err))?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: CourseId) -> Result<Course, Error> {
        let removed = self
            .courses
            .delete(&id)
            .await
            .map_err(|err| map_repository_error("course", err))?
            .ok_or_else(|| not_found(id))?;
        info!(course_id = %id, "course deleted");
        Ok(removed)
    }

    async fn summary(&self, id: CourseId) -> Result<String, Error> {
        Ok(self.load(id).await?.summary())
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
