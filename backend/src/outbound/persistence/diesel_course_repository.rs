//! PostgreSQL-backed `CourseRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{CourseRepository, Replaced, RepositoryError};
use crate::domain::{Course, CourseId};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{CourseRow, CourseUpdate};
use super::pool::DbPool;
use super::schema::courses;

/// Diesel implementation of [`CourseRepository`].
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_course(row: CourseRow) -> Result<Course, RepositoryError> {
    let cutoff = u8::try_from(row.cutoff)
        .map_err(|_| corrupt_row("course", format!("cutoff {}", row.cutoff)))?;
    Ok(Course {
        id: CourseId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        cutoff,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn to_row(course: &Course) -> CourseRow {
    CourseRow {
        id: *course.id.as_uuid(),
        name: course.name.clone(),
        description: course.description.clone(),
        cutoff: i32::from(course.cutoff),
        created_at: course.created_at,
        updated_at: course.updated_at,
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(courses::table)
            .values(&to_row(course))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = courses::table
            .find(id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn update(&self, course: &Course) -> Result<Option<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = CourseUpdate {
            name: &course.name,
            description: &course.description,
            cutoff: i32::from(course.cutoff),
            updated_at: course.updated_at,
        };
        let row = diesel::update(courses::table.find(course.id.as_uuid()))
            .set(&changes)
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn delete(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::delete(courses::table.find(id.as_uuid()))
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn list(&self) -> Result<Vec<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .order(courses::seq.asc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_course).collect()
    }

    async fn replace_all(&self, batch: &[Course]) -> Result<Replaced<Course>, RepositoryError> {
        let rows: Vec<CourseRow> = batch.iter().map(to_row).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (cleared, written) = conn
            .transaction(|conn| {
                async move {
                    let cleared = diesel::delete(courses::table).execute(conn).await?;
                    let mut written = Vec::with_capacity(rows.len());
                    for row in &rows {
                        let inserted = diesel::insert_into(courses::table)
                            .values(row)
                            .on_conflict_do_nothing()
                            .execute(conn)
                            .await?;
                        written.push(inserted == 1);
                    }
                    Ok((cleared, written))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        let stored = batch
            .iter()
            .zip(written)
            .filter_map(|(course, kept)| kept.then(|| course.clone()))
            .collect();
        Ok(Replaced { cleared, stored })
    }
}
