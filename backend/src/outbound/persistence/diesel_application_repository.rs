//! PostgreSQL-backed `ApplicationRepository`.
//!
//! The `applications_student_course_key` unique index is the duplicate guard;
//! a plain insert either succeeds or reports the violation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationRepository, RepositoryError};
use crate::domain::{
    Application, ApplicationFilter, ApplicationId, CourseId, Page, StudentId, UniversityId,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::ApplicationRow;
use super::pool::DbPool;
use super::schema::applications;

/// Diesel implementation of [`ApplicationRepository`].
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Self {
            id: ApplicationId::from_uuid(row.id),
            student_id: StudentId::from_uuid(row.student_id),
            course_id: CourseId::from_uuid(row.course_id),
            university_id: UniversityId::from_uuid(row.university_id),
            applied_at: row.applied_at,
        }
    }
}

fn sql_count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = ApplicationRow {
            id: *application.id.as_uuid(),
            student_id: *application.student_id.as_uuid(),
            course_id: *application.course_id.as_uuid(),
            university_id: *application.university_id.as_uuid(),
            applied_at: application.applied_at,
        };
        diesel::insert_into(applications::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = applications::table
            .find(id.as_uuid())
            .select(ApplicationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Application::from))
    }

    async fn delete(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::delete(applications::table.find(id.as_uuid()))
            .returning(ApplicationRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Application::from))
    }

    async fn list(
        &self,
        filter: &ApplicationFilter,
        page: &Page,
    ) -> Result<Vec<Application>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = applications::table
            .select(ApplicationRow::as_select())
            .order(applications::seq.asc())
            .offset(sql_count(page.offset()))
            .into_boxed();
        if let Some(student_id) = filter.student_id {
            query = query.filter(applications::student_id.eq(*student_id.as_uuid()));
        }
        if let Some(course_id) = filter.course_id {
            query = query.filter(applications::course_id.eq(*course_id.as_uuid()));
        }
        if let Some(university_id) = filter.university_id {
            query = query.filter(applications::university_id.eq(*university_id.as_uuid()));
        }
        if let Some(limit) = page.limit() {
            query = query.limit(sql_count(limit));
        }

        let rows: Vec<ApplicationRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Application::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(500, 500)]
    #[case(usize::MAX, i64::MAX)]
    fn counts_saturate_at_i64_max(#[case] value: usize, #[case] expected: i64) {
        assert_eq!(sql_count(value), expected);
    }
}
