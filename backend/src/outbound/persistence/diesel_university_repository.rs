//! PostgreSQL-backed `UniversityRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Array, Uuid as SqlUuid};
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{Replaced, RepositoryError, UniversityRepository};
use crate::domain::{CourseId, University, UniversityId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{UniversityRow, UniversityUpdate};
use super::pool::DbPool;
use super::schema::universities;

diesel::define_sql_function! {
    fn array_append(array: Array<SqlUuid>, element: SqlUuid) -> Array<SqlUuid>;
}

/// Diesel implementation of [`UniversityRepository`]. Offered courses are
/// stored inline as a UUID array.
#[derive(Clone)]
pub struct DieselUniversityRepository {
    pool: DbPool,
}

impl DieselUniversityRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<UniversityRow> for University {
    fn from(row: UniversityRow) -> Self {
        Self {
            id: UniversityId::from_uuid(row.id),
            name: row.name,
            location: row.location,
            established_year: row.established_year,
            course_ids: row.course_ids.into_iter().map(CourseId::from_uuid).collect(),
            created_at: row.created_at,
        }
    }
}

fn to_row(university: &University) -> UniversityRow {
    UniversityRow {
        id: *university.id.as_uuid(),
        name: university.name.clone(),
        location: university.location.clone(),
        established_year: university.established_year,
        course_ids: university
            .course_ids
            .iter()
            .map(|id| *id.as_uuid())
            .collect::<Vec<Uuid>>(),
        created_at: university.created_at,
    }
}

#[async_trait]
impl UniversityRepository for DieselUniversityRepository {
    async fn insert(&self, university: &University) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(universities::table)
            .values(&to_row(university))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UniversityId) -> Result<Option<University>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = universities::table
            .find(id.as_uuid())
            .select(UniversityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(University::from))
    }

    async fn update(&self, university: &University) -> Result<Option<University>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UniversityUpdate {
            name: &university.name,
            location: &university.location,
            established_year: university.established_year,
        };
        let row = diesel::update(universities::table.find(university.id.as_uuid()))
            .set(&changes)
            .returning(UniversityRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(University::from))
    }

    async fn attach_course(
        &self,
        id: &UniversityId,
        course_id: &CourseId,
    ) -> Result<Option<University>, RepositoryError> {
        let course = *course_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let appended = diesel::update(
            universities::table
                .find(id.as_uuid())
                .filter(diesel::dsl::not(universities::course_ids.contains(vec![course]))),
        )
        .set(universities::course_ids.eq(array_append(universities::course_ids, course)))
        .returning(UniversityRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        if let Some(row) = appended {
            return Ok(Some(row.into()));
        }
        // Absent, or the course was already listed.
        let row = universities::table
            .find(id.as_uuid())
            .select(UniversityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(University::from))
    }

    async fn delete(&self, id: &UniversityId) -> Result<Option<University>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::delete(universities::table.find(id.as_uuid()))
            .returning(UniversityRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(University::from))
    }

    async fn list(&self) -> Result<Vec<University>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UniversityRow> = universities::table
            .order(universities::seq.asc())
            .select(UniversityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(University::from).collect())
    }

    async fn replace_all(
        &self,
        batch: &[University],
    ) -> Result<Replaced<University>, RepositoryError> {
        let rows: Vec<UniversityRow> = batch.iter().map(to_row).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (cleared, written) = conn
            .transaction(|conn| {
                async move {
                    let cleared = diesel::delete(universities::table).execute(conn).await?;
                    let mut written = Vec::with_capacity(rows.len());
                    for row in &rows {
                        let inserted = diesel::insert_into(universities::table)
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
            .filter_map(|(university, kept)| kept.then(|| university.clone()))
            .collect();
        Ok(Replaced { cleared, stored })
    }
}
