//! University service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{CourseRepository, UniversityManagement, UniversityRepository};
use super::repository_errors::{entity_not_found, map_repository_error};
use super::{CourseId, Error, NewUniversity, University, UniversityId, UniversityPatch};

fn not_found(id: UniversityId) -> Error {
    entity_not_found("university", id)
}

/// Implements [`UniversityManagement`]. Course references are checked
/// against the course store.
#[derive(Clone)]
pub struct UniversityService {
    universities: Arc<dyn UniversityRepository>,
    courses: Arc<dyn CourseRepository>,
    clock: Arc<dyn Clock>,
}

impl UniversityService {
    pub fn new(
        universities: Arc<dyn UniversityRepository>,
        courses: Arc<dyn CourseRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            universities,
            courses,
            clock,
        }
    }

    async fn load(&self, id: UniversityId) -> Result<University, Error> {
        self.universities
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error("university", err))?
            .ok_or_else(|| not_found(id))
    }

    async fn ensure_course(&self, id: CourseId) -> Result<(), Error> {
        self.courses
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error("course", err))?
            .map(|_| ())
            .ok_or_else(|| entity_not_found("course", id))
    }

    async fn store(&self, university: &University) -> Result<University, Error> {
        self.universities
            .update(university)
            .await
            .map_err(|err| map_repository_error("university", err))?
            .ok_or_else(|| not_found(university.id))
    }
}

#[async_trait]
impl UniversityManagement for UniversityService {
    async fn create(&self, input: NewUniversity) -> Result<University, Error> {
        let university = University::create(&input, UniversityId::random(), self.clock.utc())?;
        for course_id in &university.course_ids {
            self.ensure_course(*course_id).await?;
        }
        self.universities
            .insert(&university)
            .await
            .map_err(|err| map_repository_error("university", err))?;
        info!(university_id = %university.id, name = %university.name, "university created");
        Ok(university)
    }

    async fn get(&self, id: UniversityId) -> Result<University, Error> {
        self.load(id).await
    }

    async fn list(&self) -> Result<Vec<University>, Error> {
        self.universities
            .list()
            .await
            .map_err(|err| map_repository_error("university", err))
    }

    async fn update(&self, id: UniversityId, patch: UniversityPatch) -> Result<University, Error> {
        let updated = self.load(id).await?.apply(&patch, self.clock.utc())?;
        self.store(&updated).await
    }

    async fn delete(&self, id: UniversityId) -> Result<University, Error> {
        let removed = self
            .universities
            .delete(&id)
            .await
            .map_err(|err| map_repository_error("university", err))?
            .ok_or_else(|| not_found(id))?;
        info!(university_id = %id, "university deleted");
        Ok(removed)
    }

    async fn add_course(
        &self,
        university_id: UniversityId,
        course_id: CourseId,
    ) -> Result<University, Error> {
        let current = self.load(university_id).await?;
        self.ensure_course(course_id).await?;
        if current.course_ids.contains(&course_id) {
            return Ok(current);
        }
        let stored = self
            .universities
            .attach_course(&university_id, &course_id)
            .await
            .map_err(|err| map_repository_error("university", err))?
            .ok_or_else(|| not_found(university_id))?;
        info!(%university_id, %course_id, "course attached to university");
        Ok(stored)
    }
}

#[cfg(test)]
#[path = "university_service_tests.rs"]
mod tests;
