//! Application store. The `(student_id, course_id)` check and the push
//! happen under the same lock.

use async_trait::async_trait;

use crate::domain::ports::{APPLICATION_STUDENT_COURSE_KEY, ApplicationRepository, RepositoryError};
use crate::domain::{Application, ApplicationFilter, ApplicationId, Page};

use super::table::Table;

#[derive(Debug, Default)]
pub struct MemoryApplicationRepository {
    rows: Table<Application>,
}

#[async_trait]
impl ApplicationRepository for MemoryApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock()?;
        if rows.iter().any(|row| {
            row.student_id == application.student_id && row.course_id == application.course_id
        }) {
            return Err(RepositoryError::duplicate(APPLICATION_STUDENT_COURSE_KEY));
        }
        rows.push(application.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        self.rows.find(|row| row.id == *id)
    }

    async fn delete(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        self.rows.remove(|row| row.id == *id)
    }

    async fn list(
        &self,
        filter: &ApplicationFilter,
        page: &Page,
    ) -> Result<Vec<Application>, RepositoryError> {
        let rows = self.rows.lock()?;
        let matching = rows
            .iter()
            .filter(|row| filter.matches(row))
            .skip(page.offset());
        Ok(match page.limit() {
            Some(limit) => matching.take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        })
    }
}
