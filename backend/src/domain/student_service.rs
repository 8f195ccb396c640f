//! Student registration service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::ports::{StudentDirectory, StudentRepository};
use super::repository_errors::{entity_not_found, map_repository_error};
use super::{Error, NewStudent, Student, StudentId};

fn not_found(id: StudentId) -> Error {
    entity_not_found("student", id)
}

/// Implements [`StudentDirectory`] over a [`StudentRepository`].
#[derive(Clone)]
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
    clock: Arc<dyn Clock>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { students, clock }
    }
}

#[async_trait]
impl StudentDirectory for StudentService {
    async fn register(&self, input: NewStudent) -> Result<Student, Error> {
        let student = Student::create(&input, StudentId::random(), self.clock.utc())?;
        self.students
            .insert(&student)
            .await
            .map_err(|err| map_repository_error("student", err))?;
        info!(student_id = %student.id, "student registered");
        Ok(student)
    }

    async fn get(&self, id: StudentId) -> Result<Student, Error> {
        self.students
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error("student", err))?
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> Result<Vec<Student>, Error> {
        self.students
            .list()
            .await
            .map_err(|err| map_repository_error("student", err))
    }

    async fn delete(&self, id: StudentId) -> Result<Student, Error> {
        let removed = self
            .students
            .delete(&id)
            .await
            .map_err(|err| map_repository_error("student", err))?
            .ok_or_else(|| not_found(id))?;
        info!(student_id = %id, "student deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockStudentRepository, RepositoryError, STUDENT_INDEX_NUMBER_KEY};
    use crate::test_support::MutableClock;

    fn input() -> NewStudent {
        NewStudent {
            first_name: Some("Achieng".to_owned()),
            surname: Some("Otieno".to_owned()),
            id_number: Some("32456789".to_owned()),
            email: Some("Achieng.Otieno@Example.com".to_owned()),
            index_number: Some("20401001/2019".to_owned()),
            year_of_kcse: Some(2019),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn register_normalises_email() {
        let mut repo = MockStudentRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(()));

        let service = StudentService::new(Arc::new(repo), Arc::new(MutableClock::fixed()));
        let student = service.register(input()).await.expect("registered");

        assert_eq!(student.email, "achieng.otieno@example.com");
        assert_eq!(student.full_name(), "Achieng Otieno");
    }

    #[rstest]
    #[tokio::test]
    async fn register_reports_the_colliding_field() {
        let mut repo = MockStudentRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(RepositoryError::duplicate(STUDENT_INDEX_NUMBER_KEY)));

        let service = StudentService::new(Arc::new(repo), Arc::new(MutableClock::fixed()));
        let err = service.register(input()).await.expect_err("duplicate");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.details().expect("details")["field"], "indexNumber");
    }

    #[rstest]
    #[tokio::test]
    async fn register_rejects_incomplete_input() {
        let mut repo = MockStudentRepository::new();
        repo.expect_insert().times(0);

        let service = StudentService::new(Arc::new(repo), Arc::new(MutableClock::fixed()));
        let err = service
            .register(NewStudent::default())
            .await
            .expect_err("invalid");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let violations = err.details().expect("details")["violations"]
            .as_array()
            .expect("violation list")
            .len();
        assert_eq!(violations, 6);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let mut repo = MockStudentRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(None));

        let service = StudentService::new(Arc::new(repo), Arc::new(MutableClock::fixed()));
        let err = service
            .delete(StudentId::random())
            .await
            .expect_err("not found");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
