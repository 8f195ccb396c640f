//! Destructive catalogue seeding with the sample data set.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use super::ports::{CatalogueSeeding, CourseRepository, Replaced, UniversityRepository};
use super::repository_errors::map_repository_error;
use super::seed::{sample_courses, sample_universities};
use super::{Course, CourseId, Error, University, UniversityId};

/// Implements [`CatalogueSeeding`]. Every sample is validated before the
/// store is touched; the store then swaps the table contents in one step.
/// Samples that collide on a unique key are skipped with a warning.
#[derive(Clone)]
pub struct SeedingService {
    courses: Arc<dyn CourseRepository>,
    universities: Arc<dyn UniversityRepository>,
    clock: Arc<dyn Clock>,
}

impl SeedingService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        universities: Arc<dyn UniversityRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            courses,
            universities,
            clock,
        }
    }
}

fn log_skipped<T>(entity: &str, batch: &[T], stored: &[T], name: impl Fn(&T) -> &str)
where
    T: PartialEq,
{
    for skipped in batch.iter().filter(|row| !stored.contains(row)) {
        warn!(entity, name = %name(skipped), "sample skipped on unique key");
    }
}

#[async_trait]
impl CatalogueSeeding for SeedingService {
    async fn seed_courses(&self) -> Result<Vec<Course>, Error> {
        let now = self.clock.utc();
        let batch = sample_courses()
            .iter()
            .map(|input| Course::create(input, CourseId::random(), now))
            .collect::<Result<Vec<_>, _>>()?;
        let Replaced { cleared, stored } = self
            .courses
            .replace_all(&batch)
            .await
            .map_err(|err| map_repository_error("course", err))?;
        log_skipped("course", &batch, &stored, |course| course.name.as_str());
        info!(cleared, seeded = stored.len(), "courses seeded");
        Ok(stored)
    }

    async fn seed_universities(&self) -> Result<Vec<University>, Error> {
        let now = self.clock.utc();
        let batch = sample_universities()
            .iter()
            .map(|input| University::create(input, UniversityId::random(), now))
            .collect::<Result<Vec<_>, _>>()?;
        let Replaced { cleared, stored } = self
            .universities
            .replace_all(&batch)
            .await
            .map_err(|err| map_repository_error("university", err))?;
        log_skipped("university", &batch, &stored, |university| {
            university.name.as_str()
        });
        info!(cleared, seeded = stored.len(), "universities seeded");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockCourseRepository, MockUniversityRepository, RepositoryError};
    use crate::test_support::MutableClock;

    #[rstest]
    #[tokio::test]
    async fn seeding_courses_replaces_and_skips_duplicates() {
        let mut courses = MockCourseRepository::new();
        courses.expect_replace_all().times(1).returning(|batch| {
            Ok(Replaced {
                cleared: 3,
                stored: batch
                    .iter()
                    .filter(|course| course.name != "Networking")
                    .cloned()
                    .collect(),
            })
        });

        let service = SeedingService::new(
            Arc::new(courses),
            Arc::new(MockUniversityRepository::new()),
            Arc::new(MutableClock::fixed()),
        );
        let seeded = service.seed_courses().await.expect("seeded");

        assert_eq!(seeded.len(), 9);
        assert!(seeded.iter().all(|course| course.name != "Networking"));
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_universities_inserts_every_sample() {
        let mut universities = MockUniversityRepository::new();
        universities
            .expect_replace_all()
            .times(1)
            .withf(|batch| batch.len() == 5)
            .returning(|batch| {
                Ok(Replaced {
                    cleared: 0,
                    stored: batch.to_vec(),
                })
            });

        let service = SeedingService::new(
            Arc::new(MockCourseRepository::new()),
            Arc::new(universities),
            Arc::new(MutableClock::fixed()),
        );
        let seeded = service.seed_universities().await.expect("seeded");

        assert_eq!(seeded.len(), 5);
        assert_eq!(
            seeded.first().map(|university| university.name.as_str()),
            Some("Nairobi University")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_makes_a_single_store_call_and_surfaces_outage() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_replace_all()
            .times(1)
            .returning(|_| Err(RepositoryError::connection("down")));
        courses.expect_insert().times(0);

        let service = SeedingService::new(
            Arc::new(courses),
            Arc::new(MockUniversityRepository::new()),
            Arc::new(MutableClock::fixed()),
        );
        let err = service.seed_courses().await.expect_err("outage");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
