//! Driving port for application submission and withdrawal.

use async_trait::async_trait;

use crate::domain::{Application, ApplicationId, ApplicationRequest, Error};

/// Application write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationCommand: Send + Sync {
    /// Submit an application.
    ///
    /// Fails with `invalid_request` when an id is missing, `not_found` when
    /// the course, university or student does not exist (checked in that
    /// order), and `conflict` when the student already applied to the course.
    async fn submit(&self, request: ApplicationRequest) -> Result<Application, Error>;

    /// Remove an application and return it. A second call for the same id
    /// fails with `not_found`.
    async fn withdraw(&self, id: ApplicationId) -> Result<Application, Error>;
}
