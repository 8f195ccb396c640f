//! Course and university stores. Names are unique ignoring case.

use async_trait::async_trait;

use crate::domain::ports::{
    COURSE_NAME_KEY, CourseRepository, Replaced, RepositoryError, UNIVERSITY_NAME_KEY,
    UniversityRepository,
};
use crate::domain::{Course, CourseId, University, UniversityId};

use super::table::Table;

fn same_name(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

#[derive(Debug, Default)]
pub struct MemoryCourseRepository {
    rows: Table<Course>,
}

#[async_trait]
impl CourseRepository for MemoryCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock()?;
        if rows.iter().any(|row| same_name(&row.name, &course.name)) {
            return Err(RepositoryError::duplicate(COURSE_NAME_KEY));
        }
        rows.push(course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        self.rows.find(|row| row.id == *id)
    }

    async fn update(&self, course: &Course) -> Result<Option<Course>, RepositoryError> {
        let mut rows = self.rows.lock()?;
        if rows
            .iter()
            .any(|row| row.id != course.id && same_name(&row.name, &course.name))
        {
            return Err(RepositoryError::duplicate(COURSE_NAME_KEY));
        }
        Ok(rows.iter_mut().find(|row| row.id == course.id).map(|row| {
            *row = course.clone();
            row.clone()
        }))
    }

    async fn delete(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        self.rows.remove(|row| row.id == *id)
    }

    async fn list(&self) -> Result<Vec<Course>, RepositoryError> {
        self.rows.all()
    }

    async fn replace_all(&self, courses: &[Course]) -> Result<Replaced<Course>, RepositoryError> {
        self.rows
            .replace_unique(courses, |course| course.name.to_lowercase())
    }
}

#[derive(Debug, Default)]
pub struct MemoryUniversityRepository {
    rows: Table<University>,
}

#[async_trait]
impl UniversityRepository for MemoryUniversityRepository {
    async fn insert(&self, university: &University) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock()?;
        if rows.iter().any(|row| same_name(&row.name, &university.name)) {
            return Err(RepositoryError::duplicate(UNIVERSITY_NAME_KEY));
        }
        rows.push(university.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UniversityId) -> Result<Option<University>, RepositoryError> {
        self.rows.find(|row| row.id == *id)
    }

    async fn update(&self, university: &University) -> Result<Option<University>, RepositoryError> {
        let mut rows = self.rows.lock()?;
        if rows
            .iter()
            .any(|row| row.id != university.id && same_name(&row.name, &university.name))
        {
            return Err(RepositoryError::duplicate(UNIVERSITY_NAME_KEY));
        }
        Ok(rows
            .iter_mut()
            .find(|row| row.id == university.id)
            .map(|row| {
                *row = University {
                    course_ids: std::mem::take(&mut row.course_ids),
                    ..university.clone()
                };
                row.clone()
            }))
    }

    async fn attach_course(
        &self,
        id: &UniversityId,
        course_id: &CourseId,
    ) -> Result<Option<University>, RepositoryError> {
        let mut rows = self.rows.lock()?;
        Ok(rows.iter_mut().find(|row| row.id == *id).map(|row| {
            row.attach_course(*course_id);
            row.clone()
        }))
    }

    async fn delete(&self, id: &UniversityId) -> Result<Option<University>, RepositoryError> {
        self.rows.remove(|row| row.id == *id)
    }

    async fn list(&self) -> Result<Vec<University>, RepositoryError> {
        self.rows.all()
    }

    async fn replace_all(
        &self,
        universities: &[University],
    ) -> Result<Replaced<University>, RepositoryError> {
        self.rows
            .replace_unique(universities, |university| university.name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::{CoursePatch, NewCourse, NewUniversity, UniversityPatch};

    fn course(name: &str) -> Course {
        Course::create(
            &NewCourse {
                name: Some(name.to_owned()),
                description: Some("Sample".to_owned()),
                cutoff: Some(50.0),
            },
            CourseId::random(),
            Utc::now(),
        )
        .expect("valid course")
    }

    #[rstest]
    #[tokio::test]
    async fn course_names_are_unique_ignoring_case() {
        let repo = MemoryCourseRepository::default();
        repo.insert(&course("Data Science")).await.expect("first");

        let err = repo
            .insert(&course("DATA SCIENCE"))
            .await
            .expect_err("duplicate");

        assert_eq!(err, RepositoryError::duplicate(COURSE_NAME_KEY));
    }

    #[rstest]
    #[tokio::test]
    async fn renaming_onto_another_course_is_rejected() {
        let repo = MemoryCourseRepository::default();
        let law = course("Law");
        repo.insert(&law).await.expect("law");
        repo.insert(&course("Medicine")).await.expect("medicine");

        let renamed = law
            .apply(
                &CoursePatch {
                    name: Some("medicine".to_owned()),
                    ..CoursePatch::default()
                },
                Utc::now(),
            )
            .expect("valid patch");
        let err = repo.update(&renamed).await.expect_err("duplicate");

        assert_eq!(err, RepositoryError::duplicate(COURSE_NAME_KEY));
    }

    fn university(name: &str) -> University {
        University::create(
            &NewUniversity {
                name: Some(name.to_owned()),
                location: Some("Nairobi".to_owned()),
                ..NewUniversity::default()
            },
            UniversityId::random(),
            Utc::now(),
        )
        .expect("valid university")
    }

    #[rstest]
    #[tokio::test]
    async fn replace_all_swaps_rows_and_skips_batch_duplicates() {
        let repo = MemoryCourseRepository::default();
        repo.insert(&course("Law")).await.expect("law");
        repo.insert(&course("Medicine")).await.expect("medicine");

        let batch = [course("Networking"), course("NETWORKING"), course("Law")];
        let replaced = repo.replace_all(&batch).await.expect("replaced");

        assert_eq!(replaced.cleared, 2);
        let names: Vec<&str> = replaced.stored.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Networking", "Law"]);
        assert_eq!(repo.list().await.expect("listed"), replaced.stored);
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_attaches_keep_every_course() {
        let repo = Arc::new(MemoryUniversityRepository::default());
        let target = university("Kibabii University");
        repo.insert(&target).await.expect("university");
        let courses: Vec<CourseId> = (0..16).map(|_| CourseId::random()).collect();

        let tasks: Vec<_> = courses
            .iter()
            .map(|course_id| {
                let repo = Arc::clone(&repo);
                let id = target.id;
                let course_id = *course_id;
                tokio::spawn(async move { repo.attach_course(&id, &course_id).await })
            })
            .collect();
        for task in tasks {
            task.await.expect("task joined").expect("attached");
        }

        let stored = repo
            .find_by_id(&target.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.course_ids.len(), courses.len());
        assert!(courses.iter().all(|id| stored.course_ids.contains(id)));
    }

    #[rstest]
    #[tokio::test]
    async fn update_leaves_the_course_list_alone() {
        let repo = MemoryUniversityRepository::default();
        let target = university("Kibabii University");
        repo.insert(&target).await.expect("university");
        let course_id = CourseId::random();
        repo.attach_course(&target.id, &course_id)
            .await
            .expect("attached");

        let renamed = target
            .apply(
                &UniversityPatch {
                    location: Some("Bungoma".to_owned()),
                    ..UniversityPatch::default()
                },
                Utc::now(),
            )
            .expect("valid patch");
        let stored = repo
            .update(&renamed)
            .await
            .expect("updated")
            .expect("present");

        assert_eq!(stored.location, "Bungoma");
        assert_eq!(stored.course_ids, [course_id]);
    }
}
