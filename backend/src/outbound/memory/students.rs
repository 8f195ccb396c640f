//! Student store.

use async_trait::async_trait;

use crate::domain::ports::{
    RepositoryError, STUDENT_EMAIL_KEY, STUDENT_ID_NUMBER_KEY, STUDENT_INDEX_NUMBER_KEY,
    StudentRepository,
};
use crate::domain::{Student, StudentId};

use super::table::Table;

/// First unique key of `candidate` already used by `existing`.
fn collision(existing: &Student, candidate: &Student) -> Option<&'static str> {
    if existing.id_number == candidate.id_number {
        Some(STUDENT_ID_NUMBER_KEY)
    } else if existing.email == candidate.email {
        Some(STUDENT_EMAIL_KEY)
    } else if existing.index_number == candidate.index_number {
        Some(STUDENT_INDEX_NUMBER_KEY)
    } else {
        None
    }
}

#[derive(Debug, Default)]
pub struct MemoryStudentRepository {
    rows: Table<Student>,
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn insert(&self, student: &Student) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock()?;
        if let Some(constraint) = rows.iter().find_map(|row| collision(row, student)) {
            return Err(RepositoryError::duplicate(constraint));
        }
        rows.push(student.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        self.rows.find(|row| row.id == *id)
    }

    async fn delete(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        self.rows.remove(|row| row.id == *id)
    }

    async fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        self.rows.all()
    }
}
