//! PostgreSQL-backed `StudentRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, StudentRepository};
use crate::domain::{Student, StudentId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::StudentRow;
use super::pool::DbPool;
use super::schema::students;

/// Diesel implementation of [`StudentRepository`].
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId::from_uuid(row.id),
            first_name: row.first_name,
            surname: row.surname,
            id_number: row.id_number,
            email: row.email,
            index_number: row.index_number,
            year_of_kcse: row.year_of_kcse,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn insert(&self, student: &Student) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = StudentRow {
            id: *student.id.as_uuid(),
            first_name: student.first_name.clone(),
            surname: student.surname.clone(),
            id_number: student.id_number.clone(),
            email: student.email.clone(),
            index_number: student.index_number.clone(),
            year_of_kcse: student.year_of_kcse,
            created_at: student.created_at,
        };
        diesel::insert_into(students::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = students::table
            .find(id.as_uuid())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Student::from))
    }

    async fn delete(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::delete(students::table.find(id.as_uuid()))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Student::from))
    }

    async fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .order(students::seq.asc())
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Student::from).collect())
    }
}
