//! Driving port for resetting the catalogue to sample data.

use async_trait::async_trait;

use crate::domain::{Course, Error, University};

/// Destructive sample-data seeding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueSeeding: Send + Sync {
    /// Replace every course with the sample courses.
    async fn seed_courses(&self) -> Result<Vec<Course>, Error>;

    /// Replace every university with the sample universities.
    async fn seed_universities(&self) -> Result<Vec<University>, Error>;
}
